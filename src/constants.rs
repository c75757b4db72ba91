//! Project-wide constants used across multiple modules.
//!
//! Values that users may want to tune live in [`crate::editor::EditorSettings`];
//! the ones here are the defaults those settings start from.

/// Spinner animation characters for progress indicators
pub const SPINNER_CHARS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Factor applied to samples-per-pixel on each zoom step
pub const DEFAULT_ZOOM_STEP: f64 = 1.25;

/// Pointer travel (pixels) below which a press/release is a click, not a drag
pub const DEFAULT_CLICK_THRESHOLD_PX: u32 = 5;

/// Distance (pixels at 1 sample/pixel) within which a press grabs a selection edge
pub const DEFAULT_EDGE_GRAB_PX: u32 = 5;

/// Playhead distance from the right edge that triggers auto-scroll
pub const DEFAULT_AUTOSCROLL_MARGIN_PX: usize = 30;

/// Total samples per cache rebuild above which columns are scanned in parallel
pub const DEFAULT_PARALLEL_SCAN_THRESHOLD: usize = 1 << 20;

/// Terminal columns used when rendering a waveform
pub const DEFAULT_DISPLAY_WIDTH: usize = 100;

/// Terminal rows used when rendering a waveform
pub const DEFAULT_DISPLAY_HEIGHT: usize = 12;

/// Samples handed to the editor per chunk while streaming a decode
pub const DECODE_CHUNK_SAMPLES: usize = 64 * 1024;

/// Supported audio file extensions for the command-line front end
pub const AUDIO_EXTENSIONS: &[&str] = &["wav"];

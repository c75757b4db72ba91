//! Waveform editing core.
//!
//! The pieces, leaf first:
//!
//! - [`SampleBuffer`]: the full-resolution mono samples.
//! - [`ViewTransform`]: zoom and scroll, mapping samples to pixel columns.
//! - [`DownsampleCache`]: one peak per visible column, rebuilt lazily.
//! - [`SelectionModel`]: the selected range or cursor.
//! - [`InteractionController`]: turns pointer gestures into selections.
//! - Trim and normalize, implemented on [`WaveformEditor`], which owns one of
//!   each of the above and keeps them consistent.
//!
//! Everything is synchronous and single-owner. Callers drive it from their
//! event loop and draw from [`RenderFrame`].

pub mod buffer;
pub mod cache;
pub mod edit;
pub mod frame;
pub mod interaction;
pub mod selection;
pub mod session;
pub mod transport;
pub mod view;

pub use buffer::{SampleBuffer, peak_magnitude, sample_to_pcm16};
pub use cache::DownsampleCache;
pub use edit::{NormalizeOutcome, TrimOutcome};
pub use frame::RenderFrame;
pub use interaction::{InteractionController, InteractionEvent, InteractionState};
pub use selection::SelectionModel;
pub use session::{EditorSettings, WaveformEditor};
pub use transport::PlaybackDirective;
pub use view::ViewTransform;

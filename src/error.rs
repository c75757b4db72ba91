//! Error types for the waveform editing core.

use thiserror::Error;

/// Errors surfaced by the editing core.
///
/// Stale selections, silent normalize targets and out-of-range coordinates are
/// not errors; those operations return `None` or clamp instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// The sample buffer could not grow to hold incoming samples
    #[error("Sample buffer cannot grow by {requested} samples (currently holding {current})")]
    BufferExhausted { requested: usize, current: usize },

    /// A tunable was outside the range the editor can work with
    #[error("Invalid editor setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Result type for editing operations
pub type EditorResult<T> = Result<T, EditorError>;

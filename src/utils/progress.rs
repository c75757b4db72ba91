//! Busy indicators for long-running, non-cancellable work.
//!
//! Loading a long file or normalizing it blocks until done; the command-line
//! front end shows a spinner for the duration.

use crate::constants::SPINNER_CHARS;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner with the standard styling and `message`.
///
/// # Example
///
/// ```ignore
/// use crate::utils::progress::busy_spinner;
///
/// let spinner = busy_spinner("Normalizing...");
/// // ... do work ...
/// spinner.finish_and_clear();
/// ```
pub fn busy_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style.tick_strings(SPINNER_CHARS));
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

pub mod progress;
pub mod timecode;
pub mod validation;

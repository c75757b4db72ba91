//! waveedit - a waveform buffer and view-mapping engine for audio editors.
//!
//! The [`editor`] module holds the engine: a mono sample buffer, a zoom/scroll
//! view mapping samples to pixel columns, a lazily rebuilt peak cache, a
//! selection driven by pointer gestures, and the destructive trim and
//! normalize edits. [`media`] (feature `wav`) decodes and writes WAV files.
//! The binary wraps all of it in a small command-line tool that renders the
//! waveform to the terminal and applies edits to files.

pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod utils;

#[cfg(feature = "wav")]
pub mod media;

//! Per-column peak cache for drawing the visible part of the waveform.
//!
//! Rendering a long file straight from the sample buffer would touch every
//! sample on every paint. Instead the cache holds one peak magnitude per
//! viewport column, computed only for the columns currently on screen, and is
//! rebuilt lazily the next time the renderer asks for it after something
//! marked it dirty.
//!
//! Each column scans exactly the samples between its own boundary and the next
//! column's, so a rebuild touches each visible sample once and allocates only
//! `viewport_width` floats. Very wide rebuilds (zoomed far out on a long file)
//! are split across threads with rayon; the result is assembled in a fresh
//! vector and swapped in whole.

use super::buffer::{SampleBuffer, peak_magnitude};
use super::view::ViewTransform;
use log::debug;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct DownsampleCache {
    peaks: Vec<f32>,
    dirty: bool,
    parallel_threshold: usize,
    scanned_samples: u64,
    rebuilds: u64,
}

impl DownsampleCache {
    pub fn new(parallel_threshold: usize) -> Self {
        Self {
            peaks: Vec::new(),
            dirty: true,
            parallel_threshold,
            scanned_samples: 0,
            rebuilds: 0,
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Total samples read across all rebuilds
    pub fn scanned_samples(&self) -> u64 {
        self.scanned_samples
    }

    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Peaks from the last rebuild, possibly stale
    pub fn peaks(&self) -> &[f32] {
        &self.peaks
    }

    /// Rebuild if dirty and return one peak per viewport column.
    ///
    /// Columns past the end of the audio are 0.0; an empty buffer yields an
    /// all-zero row.
    pub fn ensure_fresh(&mut self, buffer: &SampleBuffer, view: &ViewTransform) -> &[f32] {
        if self.dirty {
            self.rebuild(buffer, view);
        }
        &self.peaks
    }

    fn rebuild(&mut self, buffer: &SampleBuffer, view: &ViewTransform) {
        let width = view.viewport_width();
        let samples = buffer.as_slice();

        let first = view.column_span(0).start.min(samples.len());
        let last = view.column_span(width - 1).end.min(samples.len());
        let span = last - first;

        let column_peak = |x: usize| -> f32 {
            let range = view.column_span(x);
            let start = range.start.min(samples.len());
            let end = range.end.min(samples.len());
            peak_magnitude(&samples[start..end])
        };

        let peaks: Vec<f32> = if span > self.parallel_threshold {
            (0..width).into_par_iter().map(column_peak).collect()
        } else {
            (0..width).map(column_peak).collect()
        };

        debug!(
            "Peak cache rebuilt: {} columns, {} samples at {:.2} samples/pixel (scroll {})",
            width,
            span,
            view.samples_per_pixel(),
            view.scroll_offset()
        );

        self.peaks = peaks;
        self.scanned_samples += span as u64;
        self.rebuilds += 1;
        self.dirty = false;
    }
}

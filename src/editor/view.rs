//! Sample/pixel mapping for a horizontally scrollable, zoomable waveform.
//!
//! The view is described by two numbers: how many samples one pixel column
//! represents (`samples_per_pixel`) and how many whole columns are scrolled
//! off the left edge (`scroll_offset`). Both are kept clamped against the
//! buffer length and viewport width so the visible window never runs past the
//! end of the audio.
//!
//! Every mutating method returns `true` when it actually changed the mapping;
//! the owner uses that to invalidate anything derived from it.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    samples_per_pixel: f64,
    scroll_offset: usize,
    viewport_width: usize,
    len: usize,
    zoom_step: f64,
}

impl ViewTransform {
    pub fn new(viewport_width: usize, zoom_step: f64) -> Self {
        Self {
            samples_per_pixel: 1.0,
            scroll_offset: 0,
            viewport_width: viewport_width.max(1),
            len: 0,
            zoom_step,
        }
    }

    pub fn samples_per_pixel(&self) -> f64 {
        self.samples_per_pixel
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_width(&self) -> usize {
        self.viewport_width
    }

    /// Buffer length this mapping was last reconciled against
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Zoom level at which the whole buffer exactly fills the viewport.
    ///
    /// Never below one sample per pixel.
    pub fn fit_samples_per_pixel(&self) -> f64 {
        (self.len as f64 / self.viewport_width as f64).max(1.0)
    }

    /// Width of the whole buffer in columns at the current zoom
    pub fn total_pixels(&self) -> usize {
        (self.len as f64 / self.samples_per_pixel).floor() as usize
    }

    pub fn max_scroll(&self) -> usize {
        self.total_pixels().saturating_sub(self.viewport_width)
    }

    /// Column of `sample` in the whole-buffer coordinate space (ignores scroll)
    pub fn absolute_pixel_of_sample(&self, sample: usize) -> usize {
        (sample as f64 / self.samples_per_pixel).floor() as usize
    }

    /// Viewport column of `sample`; negative or `>= viewport_width` when off-screen
    pub fn pixel_of_sample(&self, sample: usize) -> i64 {
        self.absolute_pixel_of_sample(sample) as i64 - self.scroll_offset as i64
    }

    /// Sample under viewport column `x`, clamped to `[0, len]`.
    ///
    /// `x` may lie outside the viewport (a drag that left the widget).
    pub fn sample_of_pixel(&self, x: i64) -> usize {
        let column = x.saturating_add(self.scroll_offset as i64);
        let position = (column as f64 * self.samples_per_pixel).floor();
        position.clamp(0.0, self.len as f64) as usize
    }

    /// Unclamped `[start, end)` sample span covered by viewport column `x`.
    ///
    /// Adjacent columns share their boundary, so consecutive spans tile the
    /// buffer without overlap.
    pub fn column_span(&self, x: usize) -> Range<usize> {
        let column = (x + self.scroll_offset) as f64;
        let start = (column * self.samples_per_pixel).floor() as usize;
        let end = ((column + 1.0) * self.samples_per_pixel).floor() as usize;
        start..end
    }

    /// Column at which the audio ends, relative to the viewport
    pub fn audio_end_pixel(&self) -> i64 {
        self.total_pixels() as i64 - self.scroll_offset as i64
    }

    /// `fit / current`, i.e. 1.0 when the whole buffer is visible
    pub fn zoom_factor(&self) -> f64 {
        self.fit_samples_per_pixel() / self.samples_per_pixel
    }

    /// Human readable zoom factor such as `x2.4`
    pub fn zoom_label(&self) -> String {
        format!("x{:.1}", self.zoom_factor())
    }

    /// Zoom in one step, keeping `anchor` at viewport column `column`
    pub fn zoom_in(&mut self, anchor: usize, column: usize) -> bool {
        if self.len == 0 {
            return false;
        }
        self.zoom_about(self.samples_per_pixel / self.zoom_step, anchor, column)
    }

    /// Zoom out one step, keeping `anchor` at viewport column `column`
    pub fn zoom_out(&mut self, anchor: usize, column: usize) -> bool {
        if self.len == 0 {
            return false;
        }
        self.zoom_about(self.samples_per_pixel * self.zoom_step, anchor, column)
    }

    /// Set the zoom to `samples_per_pixel` (clamped), then scroll so that
    /// `anchor` lands on `column`.
    pub fn zoom_about(&mut self, samples_per_pixel: f64, anchor: usize, column: usize) -> bool {
        let before = (self.samples_per_pixel, self.scroll_offset);

        self.samples_per_pixel = samples_per_pixel.clamp(1.0, self.fit_samples_per_pixel());
        let offset = self.absolute_pixel_of_sample(anchor) as i64 - column as i64;
        self.scroll_offset = self.clamp_scroll(offset);

        before != (self.samples_per_pixel, self.scroll_offset)
    }

    pub fn scroll_to(&mut self, pixel: i64) -> bool {
        let clamped = self.clamp_scroll(pixel);
        let changed = clamped != self.scroll_offset;
        self.scroll_offset = clamped;
        changed
    }

    pub fn scroll_by(&mut self, delta: i64) -> bool {
        self.scroll_to((self.scroll_offset as i64).saturating_add(delta))
    }

    pub fn on_viewport_resize(&mut self, width: usize) -> bool {
        let width = width.max(1);
        if width == self.viewport_width {
            return false;
        }
        self.viewport_width = width;
        self.scroll_offset = self.clamp_scroll(self.scroll_offset as i64);
        true
    }

    /// New contents: fit the whole buffer to the viewport
    pub fn on_buffer_replaced(&mut self, len: usize) {
        self.len = len;
        self.samples_per_pixel = self.fit_samples_per_pixel();
        self.scroll_offset = 0;
    }

    /// Contents edited in place: keep the zoom, re-clamp the scroll
    pub fn on_length_changed(&mut self, len: usize) -> bool {
        let before = (self.len, self.scroll_offset);
        self.len = len;
        self.scroll_offset = self.clamp_scroll(self.scroll_offset as i64);
        before != (self.len, self.scroll_offset)
    }

    /// Reapply a zoom state captured earlier, clamped for the current length
    pub fn restore(&mut self, samples_per_pixel: f64, scroll_offset: usize) -> bool {
        let before = (self.samples_per_pixel, self.scroll_offset);
        self.samples_per_pixel = samples_per_pixel.max(1.0);
        self.scroll_offset = self.clamp_scroll(scroll_offset as i64);
        before != (self.samples_per_pixel, self.scroll_offset)
    }

    fn clamp_scroll(&self, pixel: i64) -> usize {
        pixel.clamp(0, self.max_scroll() as i64) as usize
    }
}

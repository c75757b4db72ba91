//! Everything a renderer needs to draw one frame of the waveform.

use super::session::WaveformEditor;
use serde::Serialize;

/// Read-only snapshot handed to the renderer.
///
/// Pixel positions are viewport columns and may fall outside
/// `[0, viewport_width)` when the item is scrolled off-screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame<'a> {
    /// One peak magnitude per viewport column
    pub peaks: &'a [f32],
    /// Column where the audio ends; columns at or past it have no data
    pub audio_end_pixel: i64,
    /// Highlighted columns `[start, end)` when a range is selected
    pub selection_pixels: Option<(i64, i64)>,
    pub playhead_pixel: i64,
    pub samples_per_pixel: f64,
    pub scroll_offset: usize,
    pub zoom_label: String,
}

impl RenderFrame<'_> {
    /// True when the playhead column lies inside the viewport (the final
    /// column boundary counts, so a playhead at the very end stays drawn)
    pub fn playhead_visible(&self) -> bool {
        (0..=self.peaks.len() as i64).contains(&self.playhead_pixel)
    }

    /// Half-height in rows of the bar for column `x` in a `height`-row canvas.
    ///
    /// Any audible peak gets at least one row so quiet passages do not vanish.
    pub fn bar_half_height(&self, x: usize, height: usize) -> usize {
        let amplitude = self.peaks.get(x).copied().unwrap_or(0.0).min(1.0);
        let rows = (amplitude * (height / 2) as f32) as usize;
        if rows == 0 && amplitude > 0.001 { 1 } else { rows }
    }
}

impl WaveformEditor {
    /// Refresh the peak cache if needed and describe the current frame
    pub fn render_frame(&mut self) -> RenderFrame<'_> {
        let view = &self.view;
        let selection_pixels = if self.selection.has_range() {
            self.selection
                .bounds()
                .map(|(start, end)| (view.pixel_of_sample(start), view.pixel_of_sample(end)))
        } else {
            None
        };

        RenderFrame {
            audio_end_pixel: view.audio_end_pixel(),
            selection_pixels,
            playhead_pixel: view.pixel_of_sample(self.playhead),
            samples_per_pixel: view.samples_per_pixel(),
            scroll_offset: view.scroll_offset(),
            zoom_label: view.zoom_label(),
            peaks: self.cache.ensure_fresh(&self.buffer, view),
        }
    }
}

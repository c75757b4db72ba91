//! The editing session: one buffer, its view, cache, selection and playhead.
//!
//! `WaveformEditor` is what the outside world talks to. The decoder feeds it
//! samples, the renderer asks it for a frame, the UI forwards pointer, zoom and
//! resize events, and the transport reports playback positions. Every method
//! leaves all components reconciled with each other before returning.

use super::buffer::SampleBuffer;
use super::cache::DownsampleCache;
use super::interaction::{InteractionController, InteractionEvent, InteractionState};
use super::selection::SelectionModel;
use super::view::ViewTransform;
use crate::constants::{
    DEFAULT_AUTOSCROLL_MARGIN_PX, DEFAULT_CLICK_THRESHOLD_PX, DEFAULT_EDGE_GRAB_PX,
    DEFAULT_PARALLEL_SCAN_THRESHOLD, DEFAULT_ZOOM_STEP,
};
use crate::error::{EditorError, EditorResult};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Tunables for the editing core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Factor applied to samples-per-pixel per zoom step (must be > 1)
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    /// Pointer travel in pixels below which a press/release is a click
    #[serde(default = "default_click_threshold_px")]
    pub click_threshold_px: u32,
    /// Edge grab distance in pixels (scaled by samples-per-pixel)
    #[serde(default = "default_edge_grab_px")]
    pub edge_grab_px: u32,
    /// Playhead distance from the right edge that triggers auto-scroll
    #[serde(default = "default_autoscroll_margin_px")]
    pub autoscroll_margin_px: usize,
    /// Samples per cache rebuild above which the scan runs in parallel
    #[serde(default = "default_parallel_scan_threshold")]
    pub parallel_scan_threshold: usize,
}

fn default_zoom_step() -> f64 {
    DEFAULT_ZOOM_STEP
}

fn default_click_threshold_px() -> u32 {
    DEFAULT_CLICK_THRESHOLD_PX
}

fn default_edge_grab_px() -> u32 {
    DEFAULT_EDGE_GRAB_PX
}

fn default_autoscroll_margin_px() -> usize {
    DEFAULT_AUTOSCROLL_MARGIN_PX
}

fn default_parallel_scan_threshold() -> usize {
    DEFAULT_PARALLEL_SCAN_THRESHOLD
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            zoom_step: default_zoom_step(),
            click_threshold_px: default_click_threshold_px(),
            edge_grab_px: default_edge_grab_px(),
            autoscroll_margin_px: default_autoscroll_margin_px(),
            parallel_scan_threshold: default_parallel_scan_threshold(),
        }
    }
}

impl EditorSettings {
    pub fn validate(&self) -> EditorResult<()> {
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(EditorError::InvalidSetting {
                name: "zoom_step",
                reason: format!("must be a finite number above 1.0, got {}", self.zoom_step),
            });
        }
        Ok(())
    }
}

pub struct WaveformEditor {
    pub(super) settings: EditorSettings,
    pub(super) buffer: SampleBuffer,
    pub(super) view: ViewTransform,
    pub(super) cache: DownsampleCache,
    pub(super) selection: SelectionModel,
    pub(super) interaction: InteractionController,
    pub(super) playhead: usize,
    pub(super) loading: bool,
    pub(super) loaded: bool,
    pub(super) modified: bool,
}

impl WaveformEditor {
    pub fn new(settings: EditorSettings, viewport_width: usize) -> EditorResult<Self> {
        settings.validate()?;
        Ok(Self {
            buffer: SampleBuffer::new(),
            view: ViewTransform::new(viewport_width, settings.zoom_step),
            cache: DownsampleCache::new(settings.parallel_scan_threshold),
            selection: SelectionModel::new(),
            interaction: InteractionController::new(
                settings.click_threshold_px,
                settings.edge_grab_px,
            ),
            playhead: 0,
            loading: false,
            loaded: false,
            modified: false,
            settings,
        })
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Read-only snapshot of the samples, for an encoder
    pub fn samples(&self) -> &[f32] {
        self.buffer.as_slice()
    }

    /// Snapshot as 16-bit PCM, for an encoder
    pub fn to_pcm16(&self) -> Vec<i16> {
        self.buffer.to_pcm16()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn cache(&self) -> &DownsampleCache {
        &self.cache
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn playhead(&self) -> usize {
        self.playhead
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// True when the buffer differs from what was last loaded or saved
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// The caller persisted the current snapshot
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    // --- Loading -------------------------------------------------------------

    /// Replace the contents in one go
    pub fn load(&mut self, samples: Vec<f32>) -> usize {
        self.begin_load();
        self.buffer.replace(samples);
        self.finish_load()
    }

    /// Discard the current contents and prepare for incremental appends
    pub fn begin_load(&mut self) {
        self.interaction.cancel();
        self.buffer.clear();
        self.selection.clear();
        self.playhead = 0;
        self.loading = true;
        self.loaded = false;
        self.modified = false;
        self.view.on_buffer_replaced(0);
        self.cache.invalidate();
    }

    /// Append decoded samples, returning the new length.
    ///
    /// On `BufferExhausted` nothing changes; the caller should abort the load
    /// and may still call `finish_load` to work with what arrived so far.
    pub fn append_samples(&mut self, samples: &[f32]) -> EditorResult<usize> {
        if let Err(e) = self.buffer.try_extend(samples) {
            warn!("Load aborted: {e}");
            return Err(e);
        }

        let len = self.buffer.len();
        if self.loading {
            self.view.on_buffer_replaced(len);
        } else {
            self.view.on_length_changed(len);
        }
        self.cache.invalidate();
        Ok(len)
    }

    /// Reserve room for `additional` samples ahead of appending them.
    ///
    /// Lets a decoder that knows the stream length fail before any data moves.
    pub fn reserve(&mut self, additional: usize) -> EditorResult<()> {
        self.buffer.try_reserve(additional).inspect_err(|e| {
            warn!("Cannot reserve room for incoming samples: {e}");
        })
    }

    /// Decoder signalled the end of the stream
    pub fn finish_load(&mut self) -> usize {
        let len = self.buffer.len();
        self.loading = false;
        self.loaded = len > 0;
        self.view.on_buffer_replaced(len);
        self.selection.clamp_to(len);
        self.playhead = self.playhead.min(len);
        self.cache.invalidate();

        info!(
            "Loaded {} samples ({:.2} samples/pixel to fit {} columns)",
            len,
            self.view.samples_per_pixel(),
            self.view.viewport_width()
        );
        len
    }

    // --- View ----------------------------------------------------------------

    pub fn resize(&mut self, viewport_width: usize) {
        if self.view.on_viewport_resize(viewport_width) {
            self.cache.invalidate();
        }
    }

    /// Zoom in around the playhead, centring it in the viewport
    pub fn zoom_in(&mut self) -> bool {
        let column = self.view.viewport_width() / 2;
        let changed = self.view.zoom_in(self.playhead, column);
        self.after_zoom(changed)
    }

    /// Zoom out around the playhead, centring it in the viewport
    pub fn zoom_out(&mut self) -> bool {
        let column = self.view.viewport_width() / 2;
        let changed = self.view.zoom_out(self.playhead, column);
        self.after_zoom(changed)
    }

    /// Zoom in keeping the sample under column `x` where it is
    pub fn zoom_in_at(&mut self, x: usize) -> bool {
        let anchor = self.view.sample_of_pixel(x as i64);
        let changed = self.view.zoom_in(anchor, x);
        self.after_zoom(changed)
    }

    /// Zoom out keeping the sample under column `x` where it is
    pub fn zoom_out_at(&mut self, x: usize) -> bool {
        let anchor = self.view.sample_of_pixel(x as i64);
        let changed = self.view.zoom_out(anchor, x);
        self.after_zoom(changed)
    }

    /// Fit the whole buffer to the viewport
    pub fn reset_zoom(&mut self) {
        self.view.on_buffer_replaced(self.buffer.len());
        self.cache.invalidate();
    }

    /// Reapply a zoom state captured with `view().samples_per_pixel()` and
    /// `view().scroll_offset()`
    pub fn restore_zoom(&mut self, samples_per_pixel: f64, scroll_offset: usize) {
        if self.view.restore(samples_per_pixel, scroll_offset) {
            self.cache.invalidate();
        }
    }

    pub fn scroll_to(&mut self, pixel: i64) {
        if self.view.scroll_to(pixel) {
            self.cache.invalidate();
        }
    }

    pub fn scroll_by(&mut self, delta: i64) {
        if self.view.scroll_by(delta) {
            self.cache.invalidate();
        }
    }

    fn after_zoom(&mut self, changed: bool) -> bool {
        if changed {
            self.cache.invalidate();
            debug!(
                "Zoom {} ({:.2} samples/pixel, scroll {})",
                self.view.zoom_label(),
                self.view.samples_per_pixel(),
                self.view.scroll_offset()
            );
        }
        changed
    }

    // --- Selection -----------------------------------------------------------

    pub fn set_playhead(&mut self, sample: usize) {
        self.playhead = sample.min(self.buffer.len());
    }

    /// Select `[a, b)` in either order; the playhead moves to the start
    pub fn set_selection(&mut self, a: usize, b: usize) {
        self.selection.set_start_and_end(a, b, self.buffer.len());
        if let Some(start) = self.selection.start() {
            self.playhead = start;
        }
    }

    /// Collapse the selection to a cursor at `position`
    pub fn set_cursor(&mut self, position: usize) {
        self.selection.set_cursor(position, self.buffer.len());
        self.playhead = position.min(self.buffer.len());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Pointer -------------------------------------------------------------

    pub fn pointer_down(&mut self, x: i64) -> Option<InteractionEvent> {
        if !self.loaded {
            return None;
        }
        let event = self
            .interaction
            .pointer_down(x, &self.view, &mut self.selection);
        self.follow_selection(event)
    }

    pub fn pointer_move(&mut self, x: i64) -> Option<InteractionEvent> {
        let event = self
            .interaction
            .pointer_move(x, &self.view, &mut self.selection);
        self.follow_selection(event)
    }

    pub fn pointer_up(&mut self, x: i64) -> Option<InteractionEvent> {
        let event = self
            .interaction
            .pointer_up(x, &self.view, &mut self.selection);
        self.follow_selection(event)
    }

    fn follow_selection(&mut self, event: Option<InteractionEvent>) -> Option<InteractionEvent> {
        match event {
            Some(InteractionEvent::SelectionChanging { start, .. })
            | Some(InteractionEvent::SelectionCommitted { start, .. }) => self.playhead = start,
            Some(InteractionEvent::Clicked { position }) => self.playhead = position,
            None => {}
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(width: usize) -> WaveformEditor {
        WaveformEditor::new(EditorSettings::default(), width).unwrap()
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(EditorSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zoom_step_must_exceed_one() {
        let settings = EditorSettings {
            zoom_step: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            WaveformEditor::new(settings, 100),
            Err(EditorError::InvalidSetting { name: "zoom_step", .. })
        ));
    }

    #[test]
    fn test_new_editor_initial_state() {
        let editor = editor(500);
        assert!(editor.is_empty());
        assert!(!editor.is_loaded());
        assert!(!editor.is_loading());
        assert!(!editor.is_modified());
        assert_eq!(editor.playhead(), 0);
        assert_eq!(editor.selection().bounds(), None);
    }

    #[test]
    fn test_load_fits_to_window() {
        let mut editor = editor(500);
        assert_eq!(editor.load(vec![0.0; 100_000]), 100_000);
        assert!(editor.is_loaded());
        assert_eq!(editor.view().samples_per_pixel(), 200.0);
        assert_eq!(editor.view().scroll_offset(), 0);
        assert!(editor.cache().is_dirty());
    }

    #[test]
    fn test_incremental_load_tracks_growth() {
        let mut editor = editor(100);
        editor.begin_load();
        assert!(editor.is_loading());

        assert_eq!(editor.append_samples(&[0.1; 1_000]).unwrap(), 1_000);
        assert_eq!(editor.view().samples_per_pixel(), 10.0);
        assert_eq!(editor.append_samples(&[0.1; 1_000]).unwrap(), 2_000);
        assert_eq!(editor.view().samples_per_pixel(), 20.0);

        // Pointer input waits for the load to complete
        assert_eq!(editor.pointer_down(10), None);

        assert_eq!(editor.finish_load(), 2_000);
        assert!(editor.is_loaded());
        assert!(!editor.is_loading());
        assert!(editor.pointer_down(10).is_some());
    }

    #[test]
    fn test_empty_load_is_not_loaded() {
        let mut editor = editor(100);
        editor.begin_load();
        editor.finish_load();
        assert!(!editor.is_loaded());
    }

    #[test]
    fn test_reload_resets_selection_and_modified() {
        let mut editor = editor(100);
        editor.load(vec![0.5; 1_000]);
        editor.set_selection(100, 200);
        editor.modified = true;

        editor.load(vec![0.5; 500]);
        assert_eq!(editor.selection().bounds(), None);
        assert_eq!(editor.playhead(), 0);
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_view_changes_invalidate_cache() {
        let mut editor = editor(500);
        editor.load(vec![0.25; 100_000]);
        editor.render_frame();
        assert!(!editor.cache().is_dirty());

        editor.zoom_in();
        assert!(editor.cache().is_dirty());
        editor.render_frame();

        editor.scroll_by(10);
        assert!(editor.cache().is_dirty());
        editor.render_frame();

        editor.resize(400);
        assert!(editor.cache().is_dirty());
        editor.render_frame();

        // No-op changes keep the cache
        editor.resize(400);
        assert!(!editor.cache().is_dirty());
    }

    #[test]
    fn test_zoom_centres_playhead() {
        let mut editor = editor(500);
        editor.load(vec![0.0; 100_000]);
        editor.set_playhead(60_000);

        assert!(editor.zoom_in());
        assert_eq!(editor.view().pixel_of_sample(60_000), 250);
        assert!(editor.zoom_in());
        assert_eq!(editor.view().pixel_of_sample(60_000), 250);
        assert_eq!(editor.view().zoom_label(), "x1.6");
    }

    #[test]
    fn test_zoom_at_pointer_keeps_sample_under_pointer() {
        let mut editor = editor(500);
        editor.load(vec![0.0; 100_000]);
        let under = editor.view().sample_of_pixel(120);

        editor.zoom_in_at(120);
        editor.zoom_in_at(120);
        let column = editor.view().pixel_of_sample(under);
        assert!((column - 120).abs() <= 1);

        editor.zoom_out_at(120);
        editor.zoom_out_at(120);
        assert_eq!(editor.view().samples_per_pixel(), 200.0);
    }

    #[test]
    fn test_reset_and_restore_zoom() {
        let mut editor = editor(500);
        editor.load(vec![0.0; 100_000]);
        editor.restore_zoom(20.0, 3_000);
        assert_eq!(editor.view().samples_per_pixel(), 20.0);
        assert_eq!(editor.view().scroll_offset(), 3_000);

        editor.reset_zoom();
        assert_eq!(editor.view().samples_per_pixel(), 200.0);
        assert_eq!(editor.view().scroll_offset(), 0);
    }

    #[test]
    fn test_selection_moves_playhead() {
        let mut editor = editor(500);
        editor.load(vec![0.0; 100_000]);

        editor.set_selection(9_000, 3_000);
        assert_eq!(editor.selection().bounds(), Some((3_000, 9_000)));
        assert_eq!(editor.playhead(), 3_000);

        editor.set_cursor(200_000);
        assert_eq!(editor.selection().bounds(), Some((100_000, 100_000)));
        assert_eq!(editor.playhead(), 100_000);
    }

    #[test]
    fn test_pointer_click_sets_playhead() {
        let mut editor = editor(500);
        editor.load(vec![0.0; 100_000]);

        editor.pointer_down(100);
        editor.pointer_move(102);
        let event = editor.pointer_up(103);

        assert_eq!(event, Some(InteractionEvent::Clicked { position: 20_600 }));
        assert_eq!(editor.playhead(), 20_600);
        assert_eq!(editor.selection().cursor(), Some(20_600));
    }

    #[test]
    fn test_pointer_drag_selects_range() {
        let mut editor = editor(500);
        editor.load(vec![0.0; 100_000]);

        editor.pointer_down(300);
        editor.pointer_move(250);
        let event = editor.pointer_up(240);

        assert_eq!(
            event,
            Some(InteractionEvent::SelectionCommitted {
                start: 48_000,
                end: 60_000
            })
        );
        assert_eq!(editor.playhead(), 48_000);
    }

    #[test]
    fn test_reserve_exhaustion_leaves_state_untouched() {
        let mut editor = editor(100);
        editor.load(vec![0.5; 1_000]);
        let before_view = editor.view().clone();

        let result = editor.reserve(usize::MAX);

        assert!(matches!(
            result,
            Err(EditorError::BufferExhausted { current: 1_000, .. })
        ));
        assert_eq!(editor.len(), 1_000);
        assert_eq!(editor.view(), &before_view);
        assert!(editor.is_loaded());
    }
}

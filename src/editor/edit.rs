//! Destructive edits: cutting the selection and normalizing gain.
//!
//! Both operations run to completion synchronously and reconcile the view,
//! cache, selection and playhead before returning. When there is nothing to do
//! (no range, a range that went stale, silence) they return `None` and leave
//! everything untouched.

use super::session::WaveformEditor;
use log::{debug, info};
use std::ops::Range;

/// Result of a successful cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimOutcome {
    /// Samples that were removed, in pre-cut coordinates
    pub removed: Range<usize>,
    /// Buffer length after the cut
    pub new_len: usize,
}

/// Result of a successful normalize
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOutcome {
    pub range: Range<usize>,
    /// Peak magnitude found before scaling
    pub peak: f32,
}

impl NormalizeOutcome {
    /// Linear gain that was applied
    pub fn gain(&self) -> f32 {
        1.0 / self.peak
    }

    pub fn gain_db(&self) -> f32 {
        20.0 * self.gain().log10()
    }
}

impl WaveformEditor {
    /// Delete the selected range.
    ///
    /// The zoom level survives the cut; the scroll offset is pulled back if the
    /// view now extends past the shorter buffer. The selection collapses to a
    /// cursor at the cut point and the playhead follows it.
    pub fn trim(&mut self) -> Option<TrimOutcome> {
        if !self.selection.has_range() {
            return None;
        }
        let Some(range) = self.selection.clamped_range(self.buffer.len()) else {
            debug!("Trim skipped: selection no longer inside the buffer");
            return None;
        };

        self.interaction.cancel();
        let removed = self.buffer.remove_range(range.clone());
        let new_len = self.buffer.len();

        self.view.on_length_changed(new_len);
        self.cache.invalidate();

        let cut_point = range.start.min(new_len);
        self.selection.set_cursor(cut_point, new_len);
        self.playhead = cut_point;
        self.modified = true;

        info!(
            "Trimmed {} samples at {}..{} (length now {})",
            removed, range.start, range.end, new_len
        );
        Some(TrimOutcome {
            removed: range,
            new_len,
        })
    }

    /// Scale the selected range (or the whole buffer when nothing is selected)
    /// so its peak magnitude becomes exactly 1.0.
    pub fn normalize(&mut self) -> Option<NormalizeOutcome> {
        let len = self.buffer.len();
        let has_range = self.selection.has_range();
        let range = if has_range {
            self.selection.clamped_range(len)?
        } else {
            0..len
        };
        if range.is_empty() {
            return None;
        }

        let peak = self.buffer.peak(range.clone());
        if !(peak > 0.0) {
            debug!("Normalize skipped: {}..{} is silent", range.start, range.end);
            return None;
        }
        if peak == 1.0 {
            debug!("Normalize skipped: {}..{} already peaks at 1.0", range.start, range.end);
            return None;
        }

        self.interaction.cancel();
        // Dividing by the peak (rather than multiplying by its reciprocal)
        // maps the loudest sample to exactly 1.0.
        self.buffer.attenuate_range(range.clone(), peak);
        self.cache.invalidate();

        if has_range {
            self.selection.set_start_and_end(range.start, range.end, len);
            self.playhead = range.start;
        }
        self.modified = true;

        let outcome = NormalizeOutcome { range, peak };
        info!(
            "Normalized {}..{} (peak {:.4}, gain {:+.2} dB)",
            outcome.range.start,
            outcome.range.end,
            peak,
            outcome.gain_db()
        );
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::{EditorSettings, WaveformEditor};

    fn loaded(samples: Vec<f32>, width: usize) -> WaveformEditor {
        let mut editor = WaveformEditor::new(EditorSettings::default(), width).unwrap();
        editor.load(samples);
        editor
    }

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i % 1000) as f32 / 2000.0).collect()
    }

    #[test]
    fn test_trim_requires_range() {
        let mut editor = loaded(ramp(1_000), 100);
        assert_eq!(editor.trim(), None);

        editor.set_cursor(500);
        assert_eq!(editor.trim(), None);
        assert_eq!(editor.len(), 1_000);
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_trim_splices_and_moves_cursor() {
        let samples = ramp(10_000);
        let at_end = samples[6_000];
        let mut editor = loaded(samples, 100);
        editor.set_selection(4_000, 6_000);

        let outcome = editor.trim().unwrap();

        assert_eq!(outcome.removed, 4_000..6_000);
        assert_eq!(outcome.new_len, 8_000);
        assert_eq!(editor.len(), 8_000);
        assert_eq!(editor.samples()[4_000], at_end);
        assert_eq!(editor.selection().cursor(), Some(4_000));
        assert_eq!(editor.playhead(), 4_000);
        assert!(editor.is_modified());
        assert!(editor.cache().is_dirty());
    }

    #[test]
    fn test_trim_preserves_zoom_and_reclamps_scroll() {
        let mut editor = loaded(ramp(100_000), 500);
        editor.restore_zoom(50.0, 1_500);
        editor.set_selection(0, 10_000);

        editor.trim().unwrap();

        assert_eq!(editor.view().samples_per_pixel(), 50.0);
        assert_eq!(editor.view().scroll_offset(), 1_300);
    }

    #[test]
    fn test_trim_to_end_clamps_cursor() {
        let mut editor = loaded(ramp(1_000), 100);
        editor.set_selection(900, 1_000);

        editor.trim().unwrap();
        assert_eq!(editor.len(), 900);
        assert_eq!(editor.selection().cursor(), Some(900));
        assert_eq!(editor.playhead(), 900);
    }

    #[test]
    fn test_trim_everything() {
        let mut editor = loaded(ramp(1_000), 100);
        editor.set_selection(0, 1_000);

        editor.trim().unwrap();
        assert!(editor.is_empty());
        assert_eq!(editor.selection().cursor(), Some(0));
        assert_eq!(editor.render_frame().peaks, &[0.0; 100]);
    }

    #[test]
    fn test_normalize_selection() {
        let mut samples = vec![0.1_f32; 1_000];
        samples[500] = -0.4;
        samples[100] = 0.9; // outside the selection
        let mut editor = loaded(samples.clone(), 100);
        editor.set_selection(300, 700);

        let outcome = editor.normalize().unwrap();

        assert_eq!(outcome.range, 300..700);
        assert_eq!(outcome.peak, 0.4);
        assert_eq!(editor.samples()[500], -1.0);
        assert_eq!(editor.buffer().peak(300..700), 1.0);
        for i in (0..300).chain(700..1_000) {
            assert_eq!(editor.samples()[i].to_bits(), samples[i].to_bits());
        }
        assert_eq!(editor.selection().bounds(), Some((300, 700)));
        assert_eq!(editor.playhead(), 300);
        assert!(editor.is_modified());
    }

    #[test]
    fn test_normalize_whole_buffer_without_selection() {
        let mut editor = loaded(vec![0.2, -0.3, 0.15, 0.05], 4);
        editor.set_cursor(2);

        let outcome = editor.normalize().unwrap();
        assert_eq!(outcome.range, 0..4);
        assert_eq!(editor.buffer().peak(0..4), 1.0);
        // The cursor survives untouched
        assert_eq!(editor.selection().cursor(), Some(2));
        assert_eq!(editor.playhead(), 2);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples: Vec<f32> = (0..5_000).map(|i| ((i as f32) * 0.37).sin() * 0.3).collect();
        let mut editor = loaded(samples, 100);
        editor.set_selection(1_000, 4_000);

        editor.normalize().unwrap();
        let once = editor.samples().to_vec();

        assert_eq!(editor.normalize(), None);
        assert_eq!(editor.samples(), once.as_slice());
    }

    #[test]
    fn test_normalize_silence_is_noop() {
        let mut editor = loaded(vec![0.0; 1_000], 100);
        assert_eq!(editor.normalize(), None);
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_normalize_empty_buffer_is_noop() {
        let mut editor = loaded(Vec::new(), 100);
        assert_eq!(editor.normalize(), None);
    }

    #[test]
    fn test_normalize_keeps_view() {
        let mut editor = loaded(ramp(100_000), 500);
        editor.restore_zoom(20.0, 700);
        editor.set_selection(20_000, 30_000);

        editor.normalize().unwrap();
        assert_eq!(editor.view().samples_per_pixel(), 20.0);
        assert_eq!(editor.view().scroll_offset(), 700);
        assert!(editor.cache().is_dirty());
    }

    #[test]
    fn test_gain_db() {
        let outcome = super::NormalizeOutcome {
            range: 0..1,
            peak: 0.5,
        };
        assert_eq!(outcome.gain(), 2.0);
        assert!((outcome.gain_db() - 6.0206).abs() < 1e-3);
    }
}

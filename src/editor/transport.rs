//! Bridge between an external playback transport and the editor.
//!
//! The editor never starts or stops playback itself. The transport reports
//! where it is, and the editor answers with a directive: keep going, or stop
//! because the end of the selected range was reached. Along the way the
//! playhead is moved and the view follows it.

use super::session::WaveformEditor;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackDirective {
    Continue,
    /// Playback passed the end of the selection; the transport should stop
    Stop,
}

impl WaveformEditor {
    /// Where playback should begin: the selection start or cursor if there is
    /// one, the playhead otherwise
    pub fn playback_start(&self) -> usize {
        self.selection
            .start()
            .unwrap_or(self.playhead)
            .min(self.buffer.len())
    }

    /// The transport reached `sample`.
    ///
    /// Moves the playhead, scrolls so it stays visible, and asks for a stop
    /// once a selected range has been played through.
    pub fn on_playback_position(&mut self, sample: usize) -> PlaybackDirective {
        if let Some((start, end)) = self.selection.bounds()
            && self.selection.has_range()
            && sample >= end
        {
            self.playhead = start;
            debug!("Playback reached selection end {end}, stopping");
            return PlaybackDirective::Stop;
        }

        self.playhead = sample.min(self.buffer.len());
        self.follow_playhead();
        PlaybackDirective::Continue
    }

    /// The transport stopped; park the playhead at the selection start
    pub fn on_playback_stopped(&mut self) {
        self.playhead = self.selection.start().unwrap_or(0).min(self.buffer.len());
    }

    /// The transport ran off the end of the audio
    pub fn on_end_of_media(&mut self) {
        self.playhead = if self.selection.has_range() {
            self.selection.start().unwrap_or(0)
        } else {
            0
        };
    }

    /// Forget the selection and rewind
    pub fn reset_position(&mut self) {
        self.selection.clear();
        self.playhead = 0;
    }

    /// Scroll so the playhead sits a third of the way into the viewport when
    /// it has left the view or come within the auto-scroll margin of the
    /// right edge
    fn follow_playhead(&mut self) {
        let width = self.view.viewport_width();
        let visible_start = self.view.scroll_offset();
        let visible_end = visible_start + width;
        let column = self.view.absolute_pixel_of_sample(self.playhead);

        let margin = self.settings.autoscroll_margin_px.min(width);
        if column < visible_start || column > visible_end - margin {
            let target = column as i64 - (width / 3) as i64;
            if self.view.scroll_to(target) {
                self.cache.invalidate();
            }
        }
    }
}

//! Selected sample range and cursor.
//!
//! A selection is a pair of sample indices stored in order. When both are
//! equal it is a bare cursor: nothing is selected, but the position is still
//! meaningful (playback starts there). `None` means there is no cursor at all.

use std::ops::Range;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModel {
    bounds: Option<(usize, usize)>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<usize> {
        self.bounds.map(|(start, _)| start)
    }

    pub fn end(&self) -> Option<usize> {
        self.bounds.map(|(_, end)| end)
    }

    pub fn bounds(&self) -> Option<(usize, usize)> {
        self.bounds
    }

    /// True when a non-empty range is selected
    pub fn has_range(&self) -> bool {
        matches!(self.bounds, Some((start, end)) if end > start)
    }

    /// Position of a zero-width selection
    pub fn cursor(&self) -> Option<usize> {
        match self.bounds {
            Some((start, end)) if start == end => Some(start),
            _ => None,
        }
    }

    /// Store two edge candidates in either order, clamped to `[0, len]`
    pub fn set_start_and_end(&mut self, a: usize, b: usize, len: usize) {
        let a = a.min(len);
        let b = b.min(len);
        self.bounds = Some((a.min(b), a.max(b)));
    }

    /// Collapse to a cursor at `position`
    pub fn set_cursor(&mut self, position: usize, len: usize) {
        let position = position.min(len);
        self.bounds = Some((position, position));
    }

    pub fn clear(&mut self) {
        self.bounds = None;
    }

    /// Pull both edges inside `[0, len]` after the buffer shrank
    pub fn clamp_to(&mut self, len: usize) {
        if let Some((start, end)) = self.bounds {
            self.bounds = Some((start.min(len), end.min(len)));
        }
    }

    /// The selected range clamped to `len`, if it is still non-empty
    pub fn clamped_range(&self, len: usize) -> Option<Range<usize>> {
        let (start, end) = self.bounds?;
        let start = start.min(len);
        let end = end.min(len);
        (start < end).then_some(start..end)
    }
}

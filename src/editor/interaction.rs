//! Pointer gesture handling for selecting a sample range.
//!
//! One press/move/release gesture can mean three things: a click that places
//! the cursor, a drag that selects a new range, or a drag that moves one edge
//! of the existing range. Which one is decided from the press position
//! (near an edge or not) and from the raw pixel distance travelled by the
//! pointer. Sample distance is not used for the click test since at high zoom
//! a real drag can cover zero samples, and at low zoom a hand tremor can cover
//! thousands.

use super::selection::SelectionModel;
use super::view::ViewTransform;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    /// Dragging out a new range from a fixed anchor
    Selecting { anchor: usize, press_x: i64 },
    /// Moving one edge of an existing range; `anchor` is the opposite edge
    DraggingEdge { anchor: usize, press_x: i64 },
}

/// What a pointer event did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// Live update while the pointer is held down
    SelectionChanging { start: usize, end: usize },
    /// Pointer released after a drag; the range is final
    SelectionCommitted { start: usize, end: usize },
    /// Pointer released in place; the selection collapsed to a cursor
    Clicked { position: usize },
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    click_threshold_px: u32,
    edge_grab_px: u32,
}

impl InteractionController {
    pub fn new(click_threshold_px: u32, edge_grab_px: u32) -> Self {
        Self {
            state: InteractionState::Idle,
            click_threshold_px,
            edge_grab_px,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != InteractionState::Idle
    }

    /// Abandon any gesture in progress without touching the selection
    pub fn cancel(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// How close (in samples) a press must be to an edge to grab it
    pub fn edge_threshold(&self, view: &ViewTransform) -> usize {
        let minimum = self.edge_grab_px as f64;
        (minimum * view.samples_per_pixel()).max(minimum) as usize
    }

    pub fn pointer_down(
        &mut self,
        x: i64,
        view: &ViewTransform,
        selection: &mut SelectionModel,
    ) -> Option<InteractionEvent> {
        if view.is_empty() {
            return None;
        }

        let sample = view.sample_of_pixel(x);
        let threshold = self.edge_threshold(view);

        self.state = match selection.bounds() {
            Some((start, end)) if selection.has_range() && sample.abs_diff(start) <= threshold => {
                InteractionState::DraggingEdge {
                    anchor: end,
                    press_x: x,
                }
            }
            Some((start, end)) if selection.has_range() && sample.abs_diff(end) <= threshold => {
                InteractionState::DraggingEdge {
                    anchor: start,
                    press_x: x,
                }
            }
            _ => InteractionState::Selecting {
                anchor: sample,
                press_x: x,
            },
        };
        debug!("Pointer down at column {x} (sample {sample}): {:?}", self.state);

        let anchor = self.anchor()?;
        selection.set_start_and_end(sample, anchor, view.len());
        changing(selection)
    }

    pub fn pointer_move(
        &mut self,
        x: i64,
        view: &ViewTransform,
        selection: &mut SelectionModel,
    ) -> Option<InteractionEvent> {
        let anchor = self.anchor()?;
        let sample = view.sample_of_pixel(x);
        selection.set_start_and_end(sample, anchor, view.len());
        changing(selection)
    }

    pub fn pointer_up(
        &mut self,
        x: i64,
        view: &ViewTransform,
        selection: &mut SelectionModel,
    ) -> Option<InteractionEvent> {
        let state = std::mem::replace(&mut self.state, InteractionState::Idle);
        let sample = view.sample_of_pixel(x);

        match state {
            InteractionState::Idle => None,
            InteractionState::Selecting { press_x, .. }
                if x.abs_diff(press_x) < u64::from(self.click_threshold_px) =>
            {
                selection.set_cursor(sample, view.len());
                debug!("Click at sample {sample}");
                Some(InteractionEvent::Clicked { position: sample })
            }
            InteractionState::Selecting { anchor, .. }
            | InteractionState::DraggingEdge { anchor, .. } => {
                selection.set_start_and_end(sample, anchor, view.len());
                let (start, end) = selection.bounds()?;
                debug!("Selection committed: {start}..{end}");
                Some(InteractionEvent::SelectionCommitted { start, end })
            }
        }
    }

    fn anchor(&self) -> Option<usize> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Selecting { anchor, .. }
            | InteractionState::DraggingEdge { anchor, .. } => Some(anchor),
        }
    }
}

fn changing(selection: &SelectionModel) -> Option<InteractionEvent> {
    selection
        .bounds()
        .map(|(start, end)| InteractionEvent::SelectionChanging { start, end })
}

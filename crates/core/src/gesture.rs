//! Rectangle-selection gesture state machine.
//!
//! Turns raw pointer-down/move/up events into one committed rectangle per
//! drag. Robust to out-of-order events: a pointer-up without a matching
//! pointer-down is a no-op, and losing the pointer mid-drag cancels the
//! gesture without committing.

use crate::mapper::GestureRect;
use crate::redaction::RedactionKind;
use crate::session::ToolMode;

/// A finished drag, carrying the interpretation that was fixed at
/// gesture start. Switching tool modes mid-drag does not change it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommittedGesture {
    pub rect: GestureRect,
    pub kind: RedactionKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Dragging { start: (f32, f32), kind: RedactionKind },
}

#[derive(Debug)]
pub struct GestureTracker {
    state: State,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Begin a drag if the active mode draws rectangles. Pointer-downs in
    /// other modes leave the tracker idle.
    pub fn pointer_down(&mut self, mode: ToolMode, x: f32, y: f32) {
        let Some(kind) = mode.redaction_kind() else {
            return;
        };

        self.state = State::Dragging { start: (x, y), kind };
    }

    /// Live preview rectangle for the in-progress drag, normalized for
    /// drawing. Has no effect on any surface.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<GestureRect> {
        let State::Dragging { start, .. } = self.state else {
            return None;
        };

        Some(GestureRect::from_corners(start, (x, y)).normalized())
    }

    /// Finish the drag, committing the rectangle from the start corner to
    /// the release point. A stray pointer-up with no prior pointer-down
    /// emits nothing.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Option<CommittedGesture> {
        let State::Dragging { start, kind } = self.state else {
            log::debug!("pointer-up with no gesture in progress, ignoring");
            return None;
        };

        self.state = State::Idle;
        Some(CommittedGesture { rect: GestureRect::from_corners(start, (x, y)), kind })
    }

    /// The pointer left the tracked surface mid-drag: implicit cancel,
    /// discarding the preview without committing.
    pub fn pointer_leave(&mut self) {
        if self.is_dragging() {
            log::debug!("pointer left surface mid-drag, cancelling gesture");
        }
        self.state = State::Idle;
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

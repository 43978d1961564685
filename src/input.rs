//! Input model: resize handles, the gesture state machine, and the move throttle.
//!
//! `InteractionState` is the active gesture tracked between pointer-down and
//! pointer-up. Each active variant carries what the controller needs to turn a
//! pointer position into a candidate rectangle: the element's resolved
//! rectangle when the gesture began and the pointer position at that moment.
//! There is no cancel transition; releasing the pointer always commits.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::element::ElementId;
use crate::geometry::{Point, Rect};

/// Which of the eight resize handles is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Apply a percent delta to the edges this handle moves.
    ///
    /// Sizes are not clamped here; a live preview may briefly invert.
    #[must_use]
    pub fn resize(self, origin: Rect, dx: f64, dy: f64) -> Rect {
        let mut rect = origin;
        if self.moves_left() {
            rect.x = origin.x + dx;
            rect.width = origin.width - dx;
        } else if self.moves_right() {
            rect.width = origin.width + dx;
        }
        if self.moves_top() {
            rect.y = origin.y + dy;
            rect.height = origin.height - dy;
        } else if self.moves_bottom() {
            rect.height = origin.height + dy;
        }
        rect
    }
}

/// Skips move events that arrive within one frame of the last processed one.
///
/// A courtesy limit on recomputation, not a scheduler: callers always process
/// the final stop event regardless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl FrameThrottle {
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_ms: None }
    }

    /// Whether an event at `now_ms` should be processed. Records it if so.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_ms {
            if now_ms - last < self.interval_ms {
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        true
    }
}

/// Gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// An element is being moved.
    Dragging {
        /// Element being dragged.
        id: ElementId,
        /// Resolved rectangle at drag start.
        origin: Rect,
        /// Editor-space pointer position at drag start.
        start_pointer: Point,
        /// Last snapped preview; what a release would commit if nothing changed.
        preview: Rect,
        throttle: FrameThrottle,
    },
    /// An element is being resized from one handle.
    Resizing {
        /// Element being resized.
        id: ElementId,
        handle: ResizeHandle,
        /// Resolved rectangle at resize start.
        origin: Rect,
        /// Editor-space pointer position at resize start.
        start_pointer: Point,
        /// Last snapped preview.
        preview: Rect,
        throttle: FrameThrottle,
    },
}

impl InteractionState {
    /// The element under an active gesture, if any.
    #[must_use]
    pub fn active_element(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

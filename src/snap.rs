//! Snap engine: pulls a dragged or resized element onto nearby alignment targets.
//!
//! Each axis is searched on its own. Targets come in three priority tiers:
//! the canvas center (0), the canvas edges (1) and every sibling's edges and
//! center (2). A target is eligible when it lies strictly closer than the
//! threshold. Eligible targets are ranked by their distance biased by
//! `priority * PRIORITY_EPSILON`, so a canvas-level target beats a sibling
//! target that is only marginally closer; exact ties on the biased distance
//! go to the higher tier. The winner moves the element and produces one
//! [`SnapGuide`] for the renderer.
//!
//! Dragging snaps the element's origin (both edges and the center are tried
//! against each target). Resizing snaps only the edges the handle moves.
//! Snapping never changes a dragged element's size.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::{Deserialize, Serialize};

use crate::bounds::ElementBounds;
use crate::consts::{
    CANVAS_CENTER, CANVAS_EXTENT, PRIORITY_CANVAS_CENTER, PRIORITY_CANVAS_EDGE, PRIORITY_EPSILON, PRIORITY_SIBLING,
};
use crate::geometry::Rect;
use crate::input::ResizeHandle;

/// Orientation of a guide line. A vertical line marks an x position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideKind {
    Vertical,
    Horizontal,
}

/// What the element aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideLabel {
    /// The canvas center line.
    Center,
    /// A canvas edge.
    Edge,
    /// A sibling element's edge or center.
    Align,
}

/// Rendering hint for a snap that took effect. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    #[serde(rename = "type")]
    pub kind: GuideKind,
    /// Position of the guide line in percent along its axis.
    pub position: f64,
    pub label: GuideLabel,
}

/// Result of snapping a drag candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub x: f64,
    pub y: f64,
    pub guides: Vec<SnapGuide>,
}

/// Result of snapping a resize candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSnapResult {
    pub rect: Rect,
    pub guides: Vec<SnapGuide>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn guide_kind(self) -> GuideKind {
        match self {
            Self::X => GuideKind::Vertical,
            Self::Y => GuideKind::Horizontal,
        }
    }
}

/// Extent of a rectangle along one axis.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: f64,
    size: f64,
}

impl Span {
    fn of(bounds: &ElementBounds, axis: Axis) -> Self {
        match axis {
            Axis::X => Self { start: bounds.x, size: bounds.width },
            Axis::Y => Self { start: bounds.y, size: bounds.height },
        }
    }

    fn end(self) -> f64 {
        self.start + self.size
    }

    fn center(self) -> f64 {
        self.start + self.size / 2.0
    }
}

/// One eligible snap: where the snapped quantity moves to and the guide it draws.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    priority: u8,
    value: f64,
    guide: SnapGuide,
}

impl Candidate {
    fn biased_distance(&self) -> f64 {
        self.distance + f64::from(self.priority) * PRIORITY_EPSILON
    }
}

/// Ranked candidate list for one axis.
struct Ranking {
    axis: Axis,
    threshold: f64,
    candidates: Vec<Candidate>,
}

impl Ranking {
    fn new(axis: Axis, threshold: f64) -> Self {
        Self { axis, threshold, candidates: Vec::new() }
    }

    /// Offer a target: `current` is where the measured feature is now, `target`
    /// where it would snap to, `value` the resulting coordinate to report.
    fn offer(&mut self, current: f64, target: f64, value: f64, priority: u8, label: GuideLabel) {
        let distance = (current - target).abs();
        let eligible = distance < self.threshold;
        if !eligible {
            return;
        }
        let guide = SnapGuide { kind: self.axis.guide_kind(), position: target, label };
        self.candidates.push(Candidate { distance, priority, value, guide });
    }

    fn best(mut self) -> Option<Candidate> {
        self.candidates
            .sort_by(|a, b| a.biased_distance().total_cmp(&b.biased_distance()).then(a.priority.cmp(&b.priority)));
        self.candidates.into_iter().next()
    }
}

/// Snap a dragged element's origin along one axis.
fn snap_origin(span: Span, others: &[ElementBounds], axis: Axis, threshold: f64) -> Option<Candidate> {
    let mut ranking = Ranking::new(axis, threshold);
    let size = span.size;

    ranking.offer(span.center(), CANVAS_CENTER, CANVAS_CENTER - size / 2.0, PRIORITY_CANVAS_CENTER, GuideLabel::Center);

    if size <= CANVAS_EXTENT {
        ranking.offer(span.start, 0.0, 0.0, PRIORITY_CANVAS_EDGE, GuideLabel::Edge);
        ranking.offer(span.end(), CANVAS_EXTENT, CANVAS_EXTENT - size, PRIORITY_CANVAS_EDGE, GuideLabel::Edge);
    }

    for other in others {
        let o = Span::of(other, axis);
        ranking.offer(span.start, o.start, o.start, PRIORITY_SIBLING, GuideLabel::Align);
        ranking.offer(span.end(), o.end(), o.end() - size, PRIORITY_SIBLING, GuideLabel::Align);
        ranking.offer(span.center(), o.center(), o.center() - size / 2.0, PRIORITY_SIBLING, GuideLabel::Align);
        ranking.offer(span.start, o.end(), o.end(), PRIORITY_SIBLING, GuideLabel::Align);
        ranking.offer(span.end(), o.start, o.start - size, PRIORITY_SIBLING, GuideLabel::Align);
    }

    ranking.best()
}

/// Snap a single moving edge along one axis.
fn snap_edge(edge: f64, others: &[ElementBounds], axis: Axis, threshold: f64) -> Option<Candidate> {
    let mut ranking = Ranking::new(axis, threshold);

    ranking.offer(edge, CANVAS_CENTER, CANVAS_CENTER, PRIORITY_CANVAS_CENTER, GuideLabel::Center);
    ranking.offer(edge, 0.0, 0.0, PRIORITY_CANVAS_EDGE, GuideLabel::Edge);
    ranking.offer(edge, CANVAS_EXTENT, CANVAS_EXTENT, PRIORITY_CANVAS_EDGE, GuideLabel::Edge);

    for other in others {
        let o = Span::of(other, axis);
        ranking.offer(edge, o.start, o.start, PRIORITY_SIBLING, GuideLabel::Align);
        ranking.offer(edge, o.end(), o.end(), PRIORITY_SIBLING, GuideLabel::Align);
        ranking.offer(edge, o.center(), o.center(), PRIORITY_SIBLING, GuideLabel::Align);
    }

    ranking.best()
}

/// Snap a drag candidate at `(x, y)` with the given size against `others`.
///
/// Axes that find no target within `threshold` keep their candidate value.
#[must_use]
pub fn compute_snap(x: f64, y: f64, width: f64, height: f64, others: &[ElementBounds], threshold: f64) -> SnapResult {
    let mut result = SnapResult { x, y, guides: Vec::new() };

    if let Some(hit) = snap_origin(Span { start: x, size: width }, others, Axis::X, threshold) {
        result.x = hit.value;
        result.guides.push(hit.guide);
    }
    if let Some(hit) = snap_origin(Span { start: y, size: height }, others, Axis::Y, threshold) {
        result.y = hit.value;
        result.guides.push(hit.guide);
    }

    result
}

/// Snap the edges a resize handle moves. Fixed edges stay where they are.
#[must_use]
pub fn compute_resize_snap(
    rect: Rect,
    handle: ResizeHandle,
    others: &[ElementBounds],
    threshold: f64,
) -> ResizeSnapResult {
    let mut out = rect;
    let mut guides = Vec::new();

    if handle.moves_left() {
        if let Some(hit) = snap_edge(rect.x, others, Axis::X, threshold) {
            out.x = hit.value;
            out.width = rect.right() - hit.value;
            guides.push(hit.guide);
        }
    } else if handle.moves_right() {
        if let Some(hit) = snap_edge(rect.right(), others, Axis::X, threshold) {
            out.width = hit.value - rect.x;
            guides.push(hit.guide);
        }
    }

    if handle.moves_top() {
        if let Some(hit) = snap_edge(rect.y, others, Axis::Y, threshold) {
            out.y = hit.value;
            out.height = rect.bottom() - hit.value;
            guides.push(hit.guide);
        }
    } else if handle.moves_bottom() {
        if let Some(hit) = snap_edge(rect.bottom(), others, Axis::Y, threshold) {
            out.height = hit.value - rect.y;
            guides.push(hit.guide);
        }
    }

    ResizeSnapResult { rect: out, guides }
}

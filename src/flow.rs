//! Flow resolver: effective geometry for elements positioned relative to another.
//!
//! A flow element inherits only its vertical offset. Stacked below, it sits
//! `flow_gap` under its anchor's resolved bottom edge; beside, it shares the
//! anchor's resolved `y`. `x` and `width` always come from the element itself.
//! Auto-height elements substitute their measured height wherever a height is
//! read, including when they serve as someone else's anchor.
//!
//! Anchors are looked up within the element's own [`Group`]: a line anchor is
//! re-homed with [`ElementId::rebased`], so current and next slide lines never
//! resolve against each other. Resolution recurses through anchor chains and
//! tracks the ids on the current path; reaching an id already on the path is
//! a cycle, which is logged and resolved with the element's own geometry
//! instead of failing.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::element::{ElementId, GrowDirection, Group, LayoutElement, PositionMode};
use crate::geometry::Rect;
use crate::layout::Layout;
use crate::measure::HeightSource;

/// The elements of one resolution group.
#[derive(Debug, Clone)]
pub struct FlowGroup<'a> {
    group: Group,
    elements: Vec<&'a LayoutElement>,
}

impl<'a> FlowGroup<'a> {
    /// Collect one group's elements from the layout store.
    #[must_use]
    pub fn from_layout(layout: &'a Layout, group: Group) -> Self {
        Self { group, elements: layout.group(group) }
    }

    /// Build a group from an explicit element list. Elements outside `group` are dropped.
    #[must_use]
    pub fn new(group: Group, elements: impl IntoIterator<Item = &'a LayoutElement>) -> Self {
        Self { group, elements: elements.into_iter().filter(|e| e.id.group() == group).collect() }
    }

    #[must_use]
    pub fn group(&self) -> Group {
        self.group
    }

    #[must_use]
    pub fn find(&self, id: ElementId) -> Option<&'a LayoutElement> {
        self.elements.iter().copied().find(|e| e.id == id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &'a LayoutElement> + '_ {
        self.elements.iter().copied()
    }
}

/// Stored geometry with the measured height substituted for auto-height elements.
///
/// Growing up keeps the stored bottom edge fixed.
#[must_use]
pub fn measured_geometry<H: HeightSource + ?Sized>(element: &LayoutElement, heights: &H) -> Rect {
    measured_at(element, element.position, heights)
}

/// Measured geometry of `element` as if it were stored at `stored`.
#[must_use]
pub fn measured_at<H: HeightSource + ?Sized>(element: &LayoutElement, stored: Rect, heights: &H) -> Rect {
    let mut rect = stored;
    let Some(measured) = auto_height_of(element, heights) else {
        return rect;
    };
    if element.grow_direction == GrowDirection::Up {
        rect.y = rect.bottom() - measured;
    }
    rect.height = measured;
    rect
}

/// The stored `y` whose measured geometry starts at `measured_y`, given the
/// stored height the element will carry.
///
/// Inverse of the grow-up substitution in [`measured_at`]; for every other
/// element the two coincide.
#[must_use]
pub fn stored_y<H: HeightSource + ?Sized>(
    element: &LayoutElement,
    stored_height: f64,
    measured_y: f64,
    heights: &H,
) -> f64 {
    match auto_height_of(element, heights) {
        Some(measured) if element.grow_direction == GrowDirection::Up => measured_y + measured - stored_height,
        _ => measured_y,
    }
}

fn auto_height_of<H: HeightSource + ?Sized>(element: &LayoutElement, heights: &H) -> Option<f64> {
    if !element.auto_height {
        return None;
    }
    heights.measured_height(element.id)
}

/// Resolve an element's effective rectangle.
///
/// `visited` holds the ids on the current resolution path and is left as it
/// was found when this returns. Start a fresh resolution with an empty set.
pub fn resolve_position<H: HeightSource + ?Sized>(
    element: &LayoutElement,
    group: &FlowGroup<'_>,
    heights: &H,
    visited: &mut HashSet<ElementId>,
) -> Rect {
    let own = measured_geometry(element, heights);
    if element.position_mode == PositionMode::Absolute {
        return own;
    }
    let Some(anchor_ref) = element.flow_anchor else {
        return own;
    };
    let anchor_id = anchor_ref.rebased(element.id.group());
    if anchor_id == element.id {
        warn!(element = %element.id, group = %group.group(), "element is its own flow anchor; using stored geometry");
        return own;
    }
    if !visited.insert(element.id) {
        warn!(element = %element.id, group = %group.group(), "flow anchor cycle; using stored geometry");
        return own;
    }
    let resolved = match group.find(anchor_id) {
        Some(anchor) => {
            let anchor_rect = resolve_position(anchor, group, heights, visited);
            let y = if element.flow_beside { anchor_rect.y } else { anchor_rect.bottom() + element.flow_gap };
            Rect { y, ..own }
        }
        None => {
            debug!(element = %element.id, anchor = %anchor_id, "flow anchor not in group; using stored geometry");
            own
        }
    };
    visited.remove(&element.id);
    resolved
}

/// Resolve every element of a group, in group order.
#[must_use]
pub fn resolve_group<H: HeightSource + ?Sized>(group: &FlowGroup<'_>, heights: &H) -> Vec<(ElementId, Rect)> {
    let mut visited = HashSet::new();
    group
        .elements()
        .map(|element| (element.id, resolve_position(element, group, heights, &mut visited)))
        .collect()
}

/// Resolve a single element of the layout by id.
#[must_use]
pub fn resolve_element<H: HeightSource + ?Sized>(layout: &Layout, id: ElementId, heights: &H) -> Option<Rect> {
    let element = layout.get(id)?;
    let group = FlowGroup::from_layout(layout, id.group());
    Some(resolve_position(element, &group, heights, &mut HashSet::new()))
}

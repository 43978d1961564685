//! Resolved bounds of every visible element.
//!
//! Rebuilt once per interaction tick and handed to the snap engine, which
//! reads nothing else. Hidden elements still take part in flow resolution as
//! anchors but never appear as snap candidates.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use serde::Serialize;

use crate::element::{ElementId, Group, LineGroup};
use crate::flow::{FlowGroup, resolve_group};
use crate::geometry::Rect;
use crate::layout::Layout;
use crate::measure::HeightSource;

/// Resolution order: stage elements, then current-slide and next-slide lines.
const GROUPS: [Group; 3] = [Group::Stage, Group::Lines(LineGroup::Current), Group::Lines(LineGroup::Next)];

/// Post-flow rectangle of a visible element, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementBounds {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBounds {
    #[must_use]
    pub fn new(id: ElementId, rect: Rect) -> Self {
        Self { id, x: rect.x, y: rect.y, width: rect.width, height: rect.height }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Flat list of resolved bounds for one tick.
#[derive(Debug, Clone, Default)]
pub struct BoundsRegistry {
    bounds: Vec<ElementBounds>,
}

impl BoundsRegistry {
    /// Resolve every visible element of the layout.
    #[must_use]
    pub fn rebuild<H: HeightSource + ?Sized>(layout: &Layout, heights: &H) -> Self {
        let mut bounds = Vec::with_capacity(layout.len());
        for group in GROUPS {
            let flow_group = FlowGroup::from_layout(layout, group);
            for (id, rect) in resolve_group(&flow_group, heights) {
                let visible = flow_group.find(id).is_some_and(|e| e.visible);
                if visible {
                    bounds.push(ElementBounds::new(id, rect));
                }
            }
        }
        Self { bounds }
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&ElementBounds> {
        self.bounds.iter().find(|b| b.id == id)
    }

    /// Snap candidates for a gesture on `id`: everything except the element itself.
    #[must_use]
    pub fn excluding(&self, id: ElementId) -> Vec<ElementBounds> {
        self.bounds.iter().filter(|b| b.id != id).copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementBounds> {
        self.bounds.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ElementBounds] {
        &self.bounds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

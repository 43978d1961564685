//! Layout store: the current set of elements, sparse edits, and the JSON
//! payload exchanged with the settings collaborator.
//!
//! The store never creates or deletes elements on its own; `insert` and
//! `remove` exist for the host's add/toggle actions. Geometry edits arrive
//! either as committed gesture results ([`PositionPatch`]) or as immediate
//! field edits ([`ElementPatch`]).

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::consts::{CANVAS_EXTENT, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH};
use crate::element::{ElementId, GrowDirection, Group, LayoutElement, PositionMode};
use crate::error::LayoutError;
use crate::geometry::Rect;

/// Sparse geometry update. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl PositionPatch {
    /// Patch carrying only the origin.
    #[must_use]
    pub fn origin(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    /// Patch carrying a full rectangle.
    #[must_use]
    pub fn rect(rect: Rect) -> Self {
        Self { x: Some(rect.x), y: Some(rect.y), width: Some(rect.width), height: Some(rect.height) }
    }

    fn apply(&self, position: &mut Rect) {
        if let Some(x) = self.x {
            position.x = x;
        }
        if let Some(y) = self.y {
            position.y = y;
        }
        if let Some(w) = self.width {
            position.width = w;
        }
        if let Some(h) = self.height {
            position.height = h;
        }
    }
}

/// Sparse field edit committed immediately (inspector edits, toggles).
///
/// `flow_anchor` is doubly optional: `Some(None)` clears the anchor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_mode: Option<PositionMode>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "explicit_null")]
    pub flow_anchor: Option<Option<ElementId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_beside: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_height: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grow_direction: Option<GrowDirection>,
}

/// Keep an explicit `null` as `Some(None)` so it can clear a field.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<ElementId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ElementId>::deserialize(deserializer).map(Some)
}

/// Persisted layout payload: `{ "elements": [ ... ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LayoutPayload {
    #[serde(default)]
    elements: Vec<LayoutElement>,
}

/// Ordered in-memory store of layout elements.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    elements: BTreeMap<ElementId, LayoutElement>,
}

impl Layout {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an element by id.
    pub fn insert(&mut self, element: LayoutElement) {
        self.elements.insert(element.id, element);
    }

    /// Remove an element, returning it if it was present.
    pub fn remove(&mut self, id: ElementId) -> Option<LayoutElement> {
        self.elements.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&LayoutElement> {
        self.elements.get(&id)
    }

    /// Replace all elements with a full snapshot from the settings store.
    pub fn load_snapshot(&mut self, elements: Vec<LayoutElement>) {
        self.elements.clear();
        for element in elements {
            self.elements.insert(element.id, element);
        }
        for id in self.out_of_range() {
            warn!(element = %id, "persisted geometry extends past the canvas");
        }
    }

    /// Merge committed geometry into an element's stored position.
    ///
    /// # Errors
    ///
    /// Returns `UnknownElement` if no element has this id.
    pub fn commit_position(&mut self, id: ElementId, patch: &PositionPatch) -> Result<(), LayoutError> {
        let element = self.elements.get_mut(&id).ok_or(LayoutError::UnknownElement(id))?;
        patch.apply(&mut element.position);
        Ok(())
    }

    /// Apply a field edit.
    ///
    /// # Errors
    ///
    /// Returns `UnknownElement` if no element has this id.
    pub fn apply_patch(&mut self, id: ElementId, patch: &ElementPatch) -> Result<(), LayoutError> {
        let element = self.elements.get_mut(&id).ok_or(LayoutError::UnknownElement(id))?;
        if let Some(position) = &patch.position {
            position.apply(&mut element.position);
        }
        if let Some(visible) = patch.visible {
            element.visible = visible;
        }
        if let Some(mode) = patch.position_mode {
            element.position_mode = mode;
        }
        if let Some(anchor) = patch.flow_anchor {
            element.flow_anchor = anchor;
        }
        if let Some(gap) = patch.flow_gap {
            element.flow_gap = gap;
        }
        if let Some(beside) = patch.flow_beside {
            element.flow_beside = beside;
        }
        if let Some(auto) = patch.auto_height {
            element.auto_height = auto;
        }
        if let Some(dir) = patch.grow_direction {
            element.grow_direction = dir;
        }
        Ok(())
    }

    /// Elements of one resolution group, in id order.
    #[must_use]
    pub fn group(&self, group: Group) -> Vec<&LayoutElement> {
        self.elements.values().filter(|e| e.id.group() == group).collect()
    }

    /// All elements, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutElement> {
        self.elements.values()
    }

    /// Visible elements, in id order.
    pub fn visible(&self) -> impl Iterator<Item = &LayoutElement> {
        self.elements.values().filter(|e| e.visible)
    }

    /// Ids whose stored rectangle escapes `[0,100]×[0,100]`.
    #[must_use]
    pub fn out_of_range(&self) -> Vec<ElementId> {
        self.elements
            .values()
            .filter(|e| !e.position.within_canvas())
            .map(|e| e.id)
            .collect()
    }

    /// Clamp every stored rectangle to the commit limits, returning the ids changed.
    pub fn sanitize(&mut self) -> Vec<ElementId> {
        let mut changed = Vec::new();
        for element in self.elements.values_mut() {
            let clamped = clamp_rect(element.position);
            if clamped != element.position {
                element.position = clamped;
                changed.push(element.id);
            }
        }
        if !changed.is_empty() {
            info!(count = changed.len(), "clamped out-of-range layout geometry");
        }
        changed
    }

    /// Number of elements in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Parse a settings payload into a store.
    ///
    /// # Errors
    ///
    /// Returns `Payload` if the JSON is malformed or names an unknown element.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let payload: LayoutPayload = serde_json::from_str(json)?;
        let mut layout = Self::new();
        layout.load_snapshot(payload.elements);
        Ok(layout)
    }

    /// Serialize the store into a settings payload.
    ///
    /// # Errors
    ///
    /// Returns `Payload` if serialization fails.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        let payload = LayoutPayload { elements: self.elements.values().cloned().collect() };
        Ok(serde_json::to_string(&payload)?)
    }
}

/// Clamp a rectangle to the commit limits: minimum size, then inside the canvas.
#[must_use]
pub fn clamp_rect(rect: Rect) -> Rect {
    let width = finite_or(rect.width, MIN_ELEMENT_WIDTH).clamp(MIN_ELEMENT_WIDTH, CANVAS_EXTENT);
    let height = finite_or(rect.height, MIN_ELEMENT_HEIGHT).clamp(MIN_ELEMENT_HEIGHT, CANVAS_EXTENT);
    Rect {
        x: finite_or(rect.x, 0.0).clamp(0.0, CANVAS_EXTENT - width),
        y: finite_or(rect.y, 0.0).clamp(0.0, CANVAS_EXTENT - height),
        width,
        height,
    }
}

/// Clamp an origin so a rectangle of the given size stays inside the canvas.
#[must_use]
pub fn clamp_origin(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    let max_x = (CANVAS_EXTENT - width).max(0.0);
    let max_y = (CANVAS_EXTENT - height).max(0.0);
    (finite_or(x, 0.0).clamp(0.0, max_x), finite_or(y, 0.0).clamp(0.0, max_y))
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;
use crate::element::{GrowDirection, LayoutElement};
use crate::measure::NoMeasurements;

fn el(id: ElementId, x: f64, y: f64, w: f64, h: f64) -> LayoutElement {
    LayoutElement::absolute(id, Rect::new(x, y, w, h))
}

fn sample_layout() -> Layout {
    let mut layout = Layout::new();
    layout.insert(el(ElementId::HEADER, 0.0, 0.0, 100.0, 8.0));
    layout.insert(el(ElementId::PREVIEW, 60.0, 60.0, 35.0, 30.0).hidden());
    layout.insert(el(ElementId::ORIGINAL, 5.0, 20.0, 90.0, 10.0).with_auto_height(GrowDirection::Down));
    layout.insert(el(ElementId::TRANSLATION, 5.0, 0.0, 90.0, 10.0).flowing_below(ElementId::ORIGINAL, 2.0));
    layout.insert(el(ElementId::NEXT_ORIGINAL, 5.0, 70.0, 90.0, 8.0).hidden());
    layout.insert(el(ElementId::NEXT_TRANSLATION, 5.0, 0.0, 90.0, 8.0).flowing_below(ElementId::NEXT_ORIGINAL, 1.0));
    layout
}

#[test]
fn rebuild_contains_only_visible_elements() {
    let registry = BoundsRegistry::rebuild(&sample_layout(), &NoMeasurements);
    let ids: Vec<ElementId> = registry.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![ElementId::HEADER, ElementId::ORIGINAL, ElementId::TRANSLATION, ElementId::NEXT_TRANSLATION]);
    assert_eq!(registry.len(), 4);
    assert!(!registry.is_empty());
}

#[test]
fn rebuild_uses_resolved_geometry() {
    let registry = BoundsRegistry::rebuild(&sample_layout(), &NoMeasurements);
    assert_eq!(registry.get(ElementId::TRANSLATION).unwrap().y, 32.0);
}

#[test]
fn hidden_anchor_still_positions_dependents() {
    let registry = BoundsRegistry::rebuild(&sample_layout(), &NoMeasurements);
    assert!(registry.get(ElementId::NEXT_ORIGINAL).is_none());
    assert_eq!(registry.get(ElementId::NEXT_TRANSLATION).unwrap().y, 79.0);
}

#[test]
fn rebuild_picks_up_new_measurements() {
    let layout = sample_layout();
    let heights = HashMap::from([(ElementId::ORIGINAL, 12.4)]);
    let registry = BoundsRegistry::rebuild(&layout, &heights);
    assert_eq!(registry.get(ElementId::ORIGINAL).unwrap().height, 12.4);
    assert!((registry.get(ElementId::TRANSLATION).unwrap().y - 34.4).abs() < 1e-9);
}

#[test]
fn excluding_drops_the_dragged_element() {
    let registry = BoundsRegistry::rebuild(&sample_layout(), &NoMeasurements);
    let others = registry.excluding(ElementId::ORIGINAL);
    assert_eq!(others.len(), 3);
    assert!(others.iter().all(|b| b.id != ElementId::ORIGINAL));
}

#[test]
fn empty_layout_yields_empty_registry() {
    let registry = BoundsRegistry::rebuild(&Layout::new(), &NoMeasurements);
    assert!(registry.is_empty());
    assert!(registry.as_slice().is_empty());
}

#[test]
fn element_bounds_rect_round_trip() {
    let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
    let b = ElementBounds::new(ElementId::CLOCK, rect);
    assert_eq!(b.rect(), rect);
}

#[test]
fn element_bounds_serializes_id_tag() {
    let b = ElementBounds::new(ElementId::NEXT_ORIGINAL, Rect::new(1.0, 2.0, 3.0, 4.0));
    let v = serde_json::to_value(b).unwrap();
    assert_eq!(v["id"], "nextOriginal");
    assert_eq!(v["height"], 4.0);
}

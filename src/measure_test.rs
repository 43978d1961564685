#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn new_map_has_no_measurements() {
    let m = MeasuredHeights::new();
    assert!(m.is_empty());
    assert_eq!(m.measured_height(ElementId::ORIGINAL), None);
    assert!(!m.has_pending());
}

#[test]
fn request_then_pending_drains_queue() {
    let mut m = MeasuredHeights::new();
    m.request(ElementId::TRANSLATION);
    m.request(ElementId::ORIGINAL);
    m.request(ElementId::ORIGINAL);
    assert!(m.has_pending());
    assert_eq!(m.pending(), vec![ElementId::ORIGINAL, ElementId::TRANSLATION]);
    assert!(!m.has_pending());
    assert!(m.pending().is_empty());
}

#[test]
fn measurement_is_not_visible_until_recorded() {
    let mut m = MeasuredHeights::new();
    m.record(ElementId::ORIGINAL, 10.0);
    m.request(ElementId::ORIGINAL);
    // Content changed, but the new height lands a frame later.
    assert_eq!(m.measured_height(ElementId::ORIGINAL), Some(10.0));
    m.record(ElementId::ORIGINAL, 12.4);
    assert_eq!(m.measured_height(ElementId::ORIGINAL), Some(12.4));
}

#[test]
fn record_pixels_converts_with_canvas_height() {
    let mut m = MeasuredHeights::new();
    m.record_pixels(ElementId::ORIGINAL, 108.0, &Canvas::new(1920.0, 1080.0));
    let h = m.measured_height(ElementId::ORIGINAL).unwrap();
    assert!((h - 10.0).abs() < 1e-9);
}

#[test]
fn record_ignores_unusable_values() {
    let mut m = MeasuredHeights::new();
    m.record(ElementId::ORIGINAL, 8.0);
    m.record(ElementId::ORIGINAL, f64::NAN);
    m.record(ElementId::ORIGINAL, -1.0);
    m.record(ElementId::ORIGINAL, f64::INFINITY);
    assert_eq!(m.measured_height(ElementId::ORIGINAL), Some(8.0));
}

#[test]
fn forget_removes_measurement_and_request() {
    let mut m = MeasuredHeights::new();
    m.record(ElementId::NEXT_ORIGINAL, 9.0);
    m.request(ElementId::NEXT_ORIGINAL);
    m.forget(ElementId::NEXT_ORIGINAL);
    assert_eq!(m.measured_height(ElementId::NEXT_ORIGINAL), None);
    assert!(!m.has_pending());
    assert_eq!(m.len(), 0);
}

#[test]
fn hash_map_is_a_height_source() {
    let mut map = HashMap::new();
    map.insert(ElementId::TITLE, 5.5);
    assert_eq!(map.measured_height(ElementId::TITLE), Some(5.5));
    assert_eq!(map.measured_height(ElementId::CLOCK), None);
}

#[test]
fn no_measurements_always_none() {
    assert_eq!(NoMeasurements.measured_height(ElementId::ORIGINAL), None);
}

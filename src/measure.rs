//! Measured heights for auto-height elements.
//!
//! Rendered text height is only known after the renderer lays the content
//! out, one frame after the edit that changed it. The renderer owns a
//! [`MeasuredHeights`] map: it requests a measurement when content changes,
//! drains [`MeasuredHeights::pending`] on the next frame, and records the
//! result. The flow resolver only ever sees the read side, [`HeightSource`],
//! so until a new record lands it keeps resolving with the previous value (or
//! the stored height when nothing was ever measured).

#[cfg(test)]
#[path = "measure_test.rs"]
mod measure_test;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::element::ElementId;
use crate::geometry::Canvas;

/// Read port for measured heights, in percent of canvas height.
pub trait HeightSource {
    fn measured_height(&self, id: ElementId) -> Option<f64>;
}

impl HeightSource for HashMap<ElementId, f64> {
    fn measured_height(&self, id: ElementId) -> Option<f64> {
        self.get(&id).copied()
    }
}

/// A source with no measurements; every auto-height element keeps its stored height.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeasurements;

impl HeightSource for NoMeasurements {
    fn measured_height(&self, _id: ElementId) -> Option<f64> {
        None
    }
}

/// Measured heights plus the queue of elements awaiting measurement.
#[derive(Debug, Clone, Default)]
pub struct MeasuredHeights {
    heights: HashMap<ElementId, f64>,
    pending: BTreeSet<ElementId>,
}

impl MeasuredHeights {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a measurement for the next frame.
    pub fn request(&mut self, id: ElementId) {
        self.pending.insert(id);
    }

    /// Take the ids scheduled for measurement, leaving the queue empty.
    pub fn pending(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Whether any measurement is still outstanding.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Record a height already expressed in percent.
    ///
    /// Non-finite or negative values are ignored so a bad measurement never
    /// replaces a good one.
    pub fn record(&mut self, id: ElementId, percent: f64) {
        if !percent.is_finite() || percent < 0.0 {
            debug!(element = %id, percent, "ignoring unusable height measurement");
            return;
        }
        self.heights.insert(id, percent);
    }

    /// Record a height measured in display pixels.
    pub fn record_pixels(&mut self, id: ElementId, pixels: f64, canvas: &Canvas) {
        self.record(id, canvas.height_to_percent(pixels));
    }

    /// Drop the measurement for an element (e.g. auto height switched off).
    pub fn forget(&mut self, id: ElementId) {
        self.heights.remove(&id);
        self.pending.remove(&id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

impl HeightSource for MeasuredHeights {
    fn measured_height(&self, id: ElementId) -> Option<f64> {
        self.heights.get(&id).copied()
    }
}

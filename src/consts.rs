//! Shared numeric constants for the layout engine.

// ── Canvas ──────────────────────────────────────────────────────

/// Full extent of the canvas on either axis, in percent.
pub const CANVAS_EXTENT: f64 = 100.0;

/// Canvas midpoint on either axis, in percent.
pub const CANVAS_CENTER: f64 = 50.0;

// ── Commit limits ───────────────────────────────────────────────

/// Smallest width an element may commit with, in percent of canvas width.
pub const MIN_ELEMENT_WIDTH: f64 = 5.0;

/// Smallest height an element may commit with, in percent of canvas height.
pub const MIN_ELEMENT_HEIGHT: f64 = 3.0;

// ── Snapping ────────────────────────────────────────────────────

/// Default snap distance in percent units.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 1.5;

/// Per-priority bias added to a candidate's distance when ranking near-ties.
pub const PRIORITY_EPSILON: f64 = 0.001;

/// Priority of the canvas center target.
pub const PRIORITY_CANVAS_CENTER: u8 = 0;

/// Priority of the canvas edge targets.
pub const PRIORITY_CANVAS_EDGE: u8 = 1;

/// Priority of sibling edge and center targets.
pub const PRIORITY_SIBLING: u8 = 2;

// ── Interaction ─────────────────────────────────────────────────

/// Minimum spacing between processed move events (one animation frame).
pub const DEFAULT_MOVE_THROTTLE_MS: f64 = 16.0;

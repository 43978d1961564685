//! Percent/pixel geometry.
//!
//! Stored element geometry is expressed in percent of the external display so
//! it survives resolution changes. The editor shows that display scaled by a
//! `render_scale`, so pointer deltas arrive in editor pixels and have to be
//! projected back to percent before they touch stored geometry.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::CANVAS_EXTENT;

/// Convert a percentage of `dimension` into pixels.
#[must_use]
pub fn to_pixels(percent: f64, dimension: f64) -> f64 {
    percent / CANVAS_EXTENT * dimension
}

/// Convert a pixel length into a percentage of `dimension`.
///
/// A non-positive dimension yields `0.0` rather than an infinite or NaN result.
#[must_use]
pub fn to_percent(pixels: f64, dimension: f64) -> f64 {
    if dimension <= 0.0 {
        return 0.0;
    }
    pixels / dimension * CANVAS_EXTENT
}

/// A point in editor space (CSS pixels of the scaled canvas preview).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in percent of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Whether the rectangle lies entirely inside `[0,100]×[0,100]`.
    #[must_use]
    pub fn within_canvas(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= CANVAS_EXTENT && self.bottom() <= CANVAS_EXTENT
    }
}

/// The external display being laid out, at its true pixel resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self { pixel_width: 1920.0, pixel_height: 1080.0 }
    }
}

impl Canvas {
    #[must_use]
    pub fn new(pixel_width: f64, pixel_height: f64) -> Self {
        Self { pixel_width, pixel_height }
    }

    /// Size of the canvas preview in editor pixels.
    #[must_use]
    pub fn editor_size(&self, render_scale: f64) -> (f64, f64) {
        (self.pixel_width * render_scale, self.pixel_height * render_scale)
    }

    /// Convert an editor-space pointer delta into a percent delta.
    #[must_use]
    pub fn delta_to_percent(&self, dx_px: f64, dy_px: f64, render_scale: f64) -> (f64, f64) {
        let (editor_w, editor_h) = self.editor_size(render_scale);
        (to_percent(dx_px, editor_w), to_percent(dy_px, editor_h))
    }

    /// Project stored percent geometry into editor pixels.
    #[must_use]
    pub fn rect_to_editor(&self, rect: Rect, render_scale: f64) -> Rect {
        let (editor_w, editor_h) = self.editor_size(render_scale);
        Rect {
            x: to_pixels(rect.x, editor_w),
            y: to_pixels(rect.y, editor_h),
            width: to_pixels(rect.width, editor_w),
            height: to_pixels(rect.height, editor_h),
        }
    }

    /// Convert a measured pixel height on the external display into percent.
    #[must_use]
    pub fn height_to_percent(&self, pixels: f64) -> f64 {
        to_percent(pixels, self.pixel_height)
    }
}

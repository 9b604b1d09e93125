//! Viewport and coordinate transformation for the image canvas.
//!
//! Handles conversion between screen coordinates (pixels on the canvas
//! widget) and image coordinates (native, unscaled, unrotated pixels of the
//! annotated image). Shapes are always stored in image coordinates, so zooming
//! or rotating the view never touches the shape collection.

use std::fmt;

use crate::model::Point;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 50.0;
const ZOOM_STEP: f64 = 1.2;

/// Represents the viewport transformation state (zoom, pan and rotation).
///
/// The image center maps to the canvas center shifted by the pan offset:
///
/// ```text
/// screen = canvas_center + pan + zoom * R(rotation) * (image - image_center)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    rotation_deg: f64,
    canvas_width: f64,
    canvas_height: f64,
    image_width: f64,
    image_height: f64,
}

impl Viewport {
    /// Creates a 1:1 viewport with the image centered on the canvas.
    pub fn new(canvas_width: f64, canvas_height: f64, image_width: f64, image_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            rotation_deg: 0.0,
            canvas_width,
            canvas_height,
            image_width,
            image_height,
        }
    }

    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    /// Sets the canvas dimensions (typically called when the widget resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    pub fn image_size(&self) -> (f64, f64) {
        (self.image_width, self.image_height)
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level; values outside 0.1..50.0 are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Rotation in degrees, normalized to `0..360`.
    pub fn rotation(&self) -> f64 {
        self.rotation_deg
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation_deg = degrees.rem_euclid(360.0);
    }

    /// Rotates the view a quarter turn clockwise.
    pub fn rotate_clockwise(&mut self) {
        self.set_rotation(self.rotation_deg + 90.0);
    }

    /// Zooms so the whole (rotated) image fits the canvas, and recenters it.
    pub fn fit_image(&mut self) {
        let theta = self.rotation_deg.to_radians();
        let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
        let width = self.image_width * cos + self.image_height * sin;
        let height = self.image_width * sin + self.image_height * cos;
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let zoom = (self.canvas_width / width).min(self.canvas_height / height);
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Resets zoom, pan and rotation.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.rotation_deg = 0.0;
    }

    /// Affine coefficients `(a, b, tx, ty)` of the image → screen map:
    ///
    /// ```text
    /// screen_x = a * x - b * y + tx
    /// screen_y = b * x + a * y + ty
    /// ```
    pub fn affine(&self) -> (f64, f64, f64, f64) {
        let theta = self.rotation_deg.to_radians();
        let a = self.zoom * theta.cos();
        let b = self.zoom * theta.sin();
        let (cx, cy) = (self.image_width / 2.0, self.image_height / 2.0);
        let ox = self.canvas_width / 2.0 + self.pan_x;
        let oy = self.canvas_height / 2.0 + self.pan_y;
        (a, b, ox - a * cx + b * cy, oy - b * cx - a * cy)
    }

    pub fn image_to_screen(&self, p: Point) -> Point {
        let (a, b, tx, ty) = self.affine();
        Point::new(a * p.x - b * p.y + tx, b * p.x + a * p.y + ty)
    }

    pub fn screen_to_image(&self, p: Point) -> Point {
        let (a, b, tx, ty) = self.affine();
        let det = a * a + b * b;
        let (sx, sy) = (p.x - tx, p.y - ty);
        Point::new((a * sx + b * sy) / det, (a * sy - b * sx) / det)
    }

    /// Converts a screen-space length (e.g. a hit tolerance in pixels) to
    /// image units.
    pub fn screen_to_image_distance(&self, d: f64) -> f64 {
        d / self.zoom
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1}) | Rotation: {:.0}°",
            self.zoom, self.pan_x, self.pan_y, self.rotation_deg
        )
    }
}

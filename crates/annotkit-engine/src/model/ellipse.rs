use serde::{Deserialize, Serialize};

use super::rectangle::{box_drag, box_handles};
use super::{AnnotationGeometry, Handle, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Ellipse {
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            x: center.x,
            y: center.y,
            width,
            height,
        }
    }
}

impl AnnotationGeometry for Ellipse {
    fn center(&self) -> Option<Point> {
        Some(Point::new(self.x, self.y))
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        Some((self.x - hw, self.y - hh, self.x + hw, self.y + hh))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    fn handles(&self) -> Vec<(Handle, Point)> {
        box_handles(self.x, self.y, self.width, self.height)
    }

    fn near_boundary(&self, p: Point, threshold: f64) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        if half_w <= f64::EPSILON || half_h <= f64::EPSILON {
            return false;
        }
        let nx = (p.x - self.x) / half_w;
        let ny = (p.y - self.y) / half_h;
        let q = nx * nx + ny * ny;

        // sqrt(q) is the radial scale factor of the ellipse through p; scaled
        // by the smaller half-axis it approximates the distance to the outline.
        let radial_tolerance = threshold / half_w.min(half_h);
        (q.sqrt() - 1.0).abs() <= radial_tolerance
    }

    fn drag_handle(
        &mut self,
        handle: Handle,
        pointer: Point,
        _dx: f64,
        _dy: f64,
        floor: f64,
    ) -> bool {
        let before = self.clone();
        box_drag(
            &mut self.x,
            &mut self.y,
            &mut self.width,
            &mut self.height,
            handle,
            pointer,
            floor,
        );
        *self != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_hit() {
        let e = Ellipse::new(Point::new(0.0, 0.0), 120.0, 80.0);
        assert!(e.near_boundary(Point::new(60.0, 0.0), 5.0));
        assert!(e.near_boundary(Point::new(0.0, -42.0), 5.0));
        assert!(!e.near_boundary(Point::new(0.0, 0.0), 5.0));
        assert!(!e.near_boundary(Point::new(80.0, 0.0), 5.0));
    }

    #[test]
    fn test_zero_size_is_skipped() {
        let e = Ellipse::new(Point::new(0.0, 0.0), 0.0, 80.0);
        assert!(!e.near_boundary(Point::new(0.0, 40.0), 5.0));
    }
}

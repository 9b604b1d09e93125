use serde::{Deserialize, Serialize};

use super::{AnnotationGeometry, Handle, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            x: center.x,
            y: center.y,
            radius,
        }
    }
}

impl AnnotationGeometry for Circle {
    fn center(&self) -> Option<Point> {
        Some(Point::new(self.x, self.y))
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        Some((
            self.x - self.radius,
            self.y - self.radius,
            self.x + self.radius,
            self.y + self.radius,
        ))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    fn handles(&self) -> Vec<(Handle, Point)> {
        let r = self.radius;
        vec![
            (Handle::Center, Point::new(self.x, self.y)),
            (Handle::Right, Point::new(self.x + r, self.y)),
            (Handle::Top, Point::new(self.x, self.y - r)),
            (Handle::Left, Point::new(self.x - r, self.y)),
            (Handle::Bottom, Point::new(self.x, self.y + r)),
        ]
    }

    fn near_boundary(&self, p: Point, threshold: f64) -> bool {
        let dist = p.distance_to(&Point::new(self.x, self.y));
        (dist - self.radius).abs() <= threshold
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
        match handle {
            Handle::Center => {
                self.x = pointer.x;
                self.y = pointer.y;
            }
            Handle::Right => self.radius = (pointer.x - self.x).max(floor),
            Handle::Left => self.radius = (self.x - pointer.x).max(floor),
            Handle::Top => self.radius = (self.y - pointer.y).max(floor),
            Handle::Bottom => self.radius = (pointer.y - self.y).max(floor),
            _ => {}
        }
        *self != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_handle_sets_radius() {
        let mut c = Circle::new(Point::new(100.0, 100.0), 50.0);
        assert!(c.drag_handle(Handle::Right, Point::new(170.0, 100.0), 20.0, 0.0, 10.0));
        assert_eq!(c.radius, 70.0);
    }

    #[test]
    fn test_radius_clamped_past_center() {
        let mut c = Circle::new(Point::new(100.0, 100.0), 50.0);
        c.drag_handle(Handle::Right, Point::new(20.0, 100.0), -130.0, 0.0, 10.0);
        assert_eq!(c.radius, 10.0);
    }

    #[test]
    fn test_ring_hit() {
        let c = Circle::new(Point::new(0.0, 0.0), 50.0);
        assert!(c.near_boundary(Point::new(53.0, 0.0), 5.0));
        assert!(!c.near_boundary(Point::new(0.0, 0.0), 5.0));
        assert!(!c.near_boundary(Point::new(60.0, 0.0), 5.0));
    }
}

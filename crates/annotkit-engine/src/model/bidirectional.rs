use serde::{Deserialize, Serialize};

use super::{AnnotationGeometry, Handle, Point};

/// Number of points of a finished bidirectional measurement.
pub const BIDIRECTIONAL_POINTS: usize = 4;

/// Two independent caliper segments: `points[0]-points[1]` and
/// `points[2]-points[3]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bidirectional {
    pub points: Vec<Point>,
    #[serde(default)]
    pub complete: bool,
    /// Provisional endpoint while a segment's second point is being placed.
    #[serde(skip)]
    pub preview_point: Option<Point>,
}

impl Bidirectional {
    pub fn start(first: Point) -> Self {
        Self {
            points: vec![first],
            complete: false,
            preview_point: None,
        }
    }

    /// Appends a placement click. Returns true once all four points exist.
    pub fn push_point(&mut self, p: Point) -> bool {
        if self.points.len() < BIDIRECTIONAL_POINTS {
            self.points.push(p);
        }
        self.preview_point = None;
        self.complete = self.points.len() == BIDIRECTIONAL_POINTS;
        self.complete
    }

    /// True while the next click closes a segment.
    pub fn awaiting_segment_end(&self) -> bool {
        self.points.len() % 2 == 1
    }

    /// Fully placed segments, in order.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        self.points
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    /// Segment from the dangling point to the preview point, if any.
    pub fn preview_segment(&self) -> Option<(Point, Point)> {
        if !self.awaiting_segment_end() {
            return None;
        }
        match (self.points.last(), self.preview_point) {
            (Some(start), Some(end)) => Some((*start, end)),
            _ => None,
        }
    }
}

fn near_segment(p: Point, a: Point, b: Point, threshold: f64) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length < 1e-9 {
        return p.distance_to(&a) <= threshold;
    }

    let perpendicular = ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / length;
    let within_box = p.x >= a.x.min(b.x) - threshold
        && p.x <= a.x.max(b.x) + threshold
        && p.y >= a.y.min(b.y) - threshold
        && p.y <= a.y.max(b.y) + threshold;
    perpendicular <= threshold && within_box
}

impl AnnotationGeometry for Bidirectional {
    fn center(&self) -> Option<Point> {
        match self.points.as_slice() {
            [a, b, ..] => Some(a.midpoint(b)),
            [a] => Some(*a),
            [] => None,
        }
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.points.first()?;
        Some(self.points.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(x1, y1, x2, y2), p| (x1.min(p.x), y1.min(p.y), x2.max(p.x), y2.max(p.y)),
        ))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            *p = p.offset(dx, dy);
        }
        if let Some(preview) = self.preview_point.as_mut() {
            *preview = preview.offset(dx, dy);
        }
    }

    fn handles(&self) -> Vec<(Handle, Point)> {
        if !self.complete || self.points.len() != BIDIRECTIONAL_POINTS {
            return Vec::new();
        }
        let mut handles: Vec<(Handle, Point)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (Handle::Endpoint(i as u8), *p))
            .collect();
        if let Some(center) = self.center() {
            handles.push((Handle::Center, center));
        }
        handles
    }

    fn near_boundary(&self, p: Point, threshold: f64) -> bool {
        self.segments()
            .into_iter()
            .any(|(a, b)| near_segment(p, a, b, threshold))
    }

    fn drag_handle(
        &mut self,
        handle: Handle,
        pointer: Point,
        dx: f64,
        dy: f64,
        _floor: f64,
    ) -> bool {
        match handle {
            Handle::Endpoint(n) => match self.points.get_mut(n as usize) {
                Some(point) if *point != pointer => {
                    *point = pointer;
                    true
                }
                _ => false,
            },
            Handle::Center if dx != 0.0 || dy != 0.0 => {
                self.translate(dx, dy);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_caliper() -> Bidirectional {
        let mut b = Bidirectional::start(Point::new(0.0, 0.0));
        b.push_point(Point::new(100.0, 0.0));
        b.push_point(Point::new(50.0, -30.0));
        b.push_point(Point::new(50.0, 30.0));
        b
    }

    #[test]
    fn test_four_points_complete() {
        let mut b = Bidirectional::start(Point::new(0.0, 0.0));
        assert!(!b.push_point(Point::new(1.0, 0.0)));
        assert!(!b.push_point(Point::new(2.0, 0.0)));
        assert!(b.push_point(Point::new(3.0, 0.0)));
        assert!(b.complete);
        // extra clicks are ignored
        b.push_point(Point::new(4.0, 0.0));
        assert_eq!(b.points.len(), 4);
    }

    #[test]
    fn test_segment_hit_respects_bounding_box() {
        let b = complete_caliper();
        assert!(b.near_boundary(Point::new(40.0, 3.0), 5.0));
        assert!(b.near_boundary(Point::new(52.0, 20.0), 5.0));
        // on the extended line but past the endpoint
        assert!(!b.near_boundary(Point::new(130.0, 0.0), 5.0));
    }

    #[test]
    fn test_endpoint_drag_moves_synthetic_center() {
        let mut b = complete_caliper();
        assert_eq!(b.center(), Some(Point::new(50.0, 0.0)));
        b.drag_handle(Handle::Endpoint(1), Point::new(200.0, 0.0), 100.0, 0.0, 10.0);
        assert_eq!(b.points[1], Point::new(200.0, 0.0));
        assert_eq!(b.center(), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_handles_only_when_complete() {
        let mut b = Bidirectional::start(Point::new(0.0, 0.0));
        b.push_point(Point::new(10.0, 0.0));
        assert!(b.handles().is_empty());
        assert_eq!(complete_caliper().handles().len(), 5);
    }
}

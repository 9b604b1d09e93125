//! Derived measurements. Computed on demand, never cached on the shape.

use std::f64::consts::PI;

use super::{Geometry, Point, Shape};

/// Enclosed area of a shape; 0 for shapes without a closed area.
pub fn compute_area(shape: &Shape) -> f64 {
    match &shape.geometry {
        Geometry::Circle(c) => PI * c.radius * c.radius,
        Geometry::Rectangle(r) => r.width * r.height,
        Geometry::Ellipse(e) => PI * (e.width / 2.0) * (e.height / 2.0),
        Geometry::Bidirectional(_) => 0.0,
    }
}

/// Euclidean distance between two points.
pub fn segment_length(p1: Point, p2: Point) -> f64 {
    p1.distance_to(&p2)
}

/// Text shown next to the active shape and in the shape list.
///
/// Closed shapes report their area; bidirectional shapes report the length of
/// every placed segment. Returns `None` when there is nothing to measure yet.
pub fn measurement_label(shape: &Shape, precision: usize) -> Option<String> {
    match &shape.geometry {
        Geometry::Bidirectional(b) => {
            let lengths: Vec<String> = b
                .segments()
                .iter()
                .enumerate()
                .map(|(i, (a, z))| {
                    format!("L{}: {:.*} px", i + 1, precision, segment_length(*a, *z))
                })
                .collect();
            if lengths.is_empty() {
                None
            } else {
                Some(lengths.join("  "))
            }
        }
        _ => Some(format!("Area: {:.*} px²", precision, compute_area(shape))),
    }
}

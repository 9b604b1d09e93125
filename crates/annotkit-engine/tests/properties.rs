//! Property tests for resize clamping and hit-test exclusivity.

use annotkit_engine::interaction::apply_drag;
use annotkit_engine::{
    find_shape_at_point, AnnotationGeometry, Bidirectional, Circle, DragMode, Ellipse, Geometry, Point,
    Rectangle, Shape, PALETTE,
};
use proptest::prelude::*;

const FLOOR: f64 = 10.0;
const THRESHOLD: f64 = 5.0;

fn closed_geometry() -> impl Strategy<Value = Geometry> {
    let center = (-500.0..500.0f64, -500.0..500.0f64).prop_map(|(x, y)| Point::new(x, y));
    prop_oneof![
        (center.clone(), FLOOR..300.0).prop_map(|(c, r)| Geometry::Circle(Circle::new(c, r))),
        (center.clone(), FLOOR..300.0, FLOOR..300.0)
            .prop_map(|(c, w, h)| Geometry::Rectangle(Rectangle::new(c, w, h))),
        (center, FLOOR..300.0, FLOOR..300.0)
            .prop_map(|(c, w, h)| Geometry::Ellipse(Ellipse::new(c, w, h))),
    ]
}

fn dimensions(geometry: &Geometry) -> Vec<f64> {
    match geometry {
        Geometry::Circle(c) => vec![c.radius],
        Geometry::Rectangle(r) => vec![r.width, r.height],
        Geometry::Ellipse(e) => vec![e.width, e.height],
        Geometry::Bidirectional(_) => Vec::new(),
    }
}

/// A shape of the given kind that fits the square of half extent `half`
/// around `center`.
fn sample_shape(id: u64, kind: u8, center: Point, half: f64) -> Shape {
    let geometry = match kind {
        0 => Geometry::Circle(Circle::new(center, half)),
        1 => Geometry::Rectangle(Rectangle::new(center, half * 2.0, half * 2.0)),
        2 => Geometry::Ellipse(Ellipse::new(center, half * 2.0, half)),
        _ => {
            let mut caliper = Bidirectional::start(center.offset(-half, 0.0));
            caliper.push_point(center.offset(half, 0.0));
            caliper.push_point(center.offset(0.0, -half / 2.0));
            caliper.push_point(center.offset(0.0, half / 2.0));
            Geometry::Bidirectional(caliper)
        }
    };
    Shape::new(id, PALETTE[0], geometry)
}

/// A point on the outline of `sample_shape(_, kind, origin, half)`.
fn boundary_point(kind: u8, half: f64, along: f64) -> Point {
    let theta = along * std::f64::consts::TAU;
    match kind {
        0 => Point::new(half * theta.cos(), half * theta.sin()),
        1 => Point::new(-half + along * 2.0 * half, -half),
        2 => Point::new(half * theta.cos(), half / 2.0 * theta.sin()),
        _ => Point::new(-half + along * 2.0 * half, 0.0),
    }
}

proptest! {
    #[test]
    fn resize_never_goes_below_floor(
        geometry in closed_geometry(),
        handle_index in 0usize..9,
        pointers in prop::collection::vec((-2000.0..2000.0f64, -2000.0..2000.0f64), 1..20),
    ) {
        let mut shape = Shape::new(1, PALETTE[0], geometry);
        let handles = shape.geometry.handles();
        let (handle, start) = handles[handle_index % handles.len()];

        let mut last = start;
        for (x, y) in pointers {
            let pointer = Point::new(x, y);
            apply_drag(&mut shape, DragMode::Handle(handle), pointer, last, FLOOR);
            last = pointer;
            for dim in dimensions(&shape.geometry) {
                prop_assert!(dim >= FLOOR, "{} fell below the floor via {}", dim, handle);
            }
        }
    }

    #[test]
    fn boundary_hit_never_returns_the_other_shape(
        kind_a in 0u8..4,
        kind_b in 0u8..4,
        size_a in 20.0..200.0f64,
        size_b in 20.0..200.0f64,
        gap in (2.0 * THRESHOLD + 1.0)..100.0,
        along in 0.0..1.0f64,
    ) {
        let a = sample_shape(1, kind_a, Point::new(0.0, 0.0), size_a);
        let b = sample_shape(2, kind_b, Point::new(size_a + size_b + gap, 0.0), size_b);
        let p = boundary_point(kind_a, size_a, along);

        let forward = [a.clone(), b.clone()];
        let backward = [b, a];
        for shapes in [&forward[..], &backward[..]] {
            let hit = find_shape_at_point(shapes, p, THRESHOLD).map(|s| s.id);
            prop_assert_eq!(hit, Some(1));
        }
    }

    #[test]
    fn locked_shape_is_never_hit(
        radius in 20.0..200.0f64,
        theta in 0.0..std::f64::consts::TAU,
        offset in -THRESHOLD..THRESHOLD,
    ) {
        let mut shape = Shape::new(
            1,
            PALETTE[0],
            Geometry::Circle(Circle::new(Point::new(0.0, 0.0), radius)),
        );
        shape.locked = true;
        let r = radius + offset;
        let p = Point::new(r * theta.cos(), r * theta.sin());
        prop_assert!(find_shape_at_point(std::slice::from_ref(&shape), p, THRESHOLD).is_none());
    }
}

//! Shape model: the data representation of one annotation.
//!
//! Geometry is always stored in the image's native coordinate space (origin
//! top-left, y down), independent of the viewport zoom and rotation.

use serde::{Deserialize, Serialize};

mod bidirectional;
mod circle;
mod color;
mod ellipse;
mod handle;
mod metrics;
mod rectangle;

pub use bidirectional::Bidirectional;
pub use circle::Circle;
pub use color::{Color, PALETTE};
pub use ellipse::Ellipse;
pub use handle::Handle;
pub use metrics::{compute_area, measurement_label, segment_length};
pub use rectangle::Rectangle;

/// Identifier of a shape. Creation-order millisecond timestamp.
pub type ShapeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// The four annotation primitives. Also used as the drawing tool id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Ellipse,
    Bidirectional,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Bidirectional,
    ];

    /// Human readable name used by the toolbar and the shape list.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
            Self::Bidirectional => "Bidirectional",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Rectangle => write!(f, "rectangle"),
            Self::Ellipse => write!(f, "ellipse"),
            Self::Bidirectional => write!(f, "bidirectional"),
        }
    }
}

/// Geometric behaviour shared by every primitive.
pub trait AnnotationGeometry {
    /// Reference point used by the `center` handle and the move cursor.
    fn center(&self) -> Option<Point>;

    /// Axis aligned bounds as `(min_x, min_y, max_x, max_y)`.
    fn bounds(&self) -> Option<(f64, f64, f64, f64)>;

    fn translate(&mut self, dx: f64, dy: f64);

    /// Named handle positions, in hit-test priority order.
    fn handles(&self) -> Vec<(Handle, Point)>;

    /// Whether `p` lies within `threshold` of the outline (not the interior).
    fn near_boundary(&self, p: Point, threshold: f64) -> bool;

    /// Applies a handle drag. `pointer` is the current pointer position and
    /// `(dx, dy)` the delta since the last sample. Dimensions never go below
    /// `floor`. Returns true when the geometry changed.
    fn drag_handle(&mut self, handle: Handle, pointer: Point, dx: f64, dy: f64, floor: f64)
        -> bool;
}

/// Type-specific geometry of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Circle(Circle),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Bidirectional(Bidirectional),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Circle(_) => ShapeKind::Circle,
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
            Geometry::Ellipse(_) => ShapeKind::Ellipse,
            Geometry::Bidirectional(_) => ShapeKind::Bidirectional,
        }
    }

    fn inner(&self) -> &dyn AnnotationGeometry {
        match self {
            Geometry::Circle(g) => g,
            Geometry::Rectangle(g) => g,
            Geometry::Ellipse(g) => g,
            Geometry::Bidirectional(g) => g,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn AnnotationGeometry {
        match self {
            Geometry::Circle(g) => g,
            Geometry::Rectangle(g) => g,
            Geometry::Ellipse(g) => g,
            Geometry::Bidirectional(g) => g,
        }
    }
}

impl AnnotationGeometry for Geometry {
    fn center(&self) -> Option<Point> {
        self.inner().center()
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.inner().bounds()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.inner_mut().translate(dx, dy);
    }

    fn handles(&self) -> Vec<(Handle, Point)> {
        self.inner().handles()
    }

    fn near_boundary(&self, p: Point, threshold: f64) -> bool {
        self.inner().near_boundary(p, threshold)
    }

    fn drag_handle(
        &mut self,
        handle: Handle,
        pointer: Point,
        dx: f64,
        dy: f64,
        floor: f64,
    ) -> bool {
        self.inner_mut().drag_handle(handle, pointer, dx, dy, floor)
    }
}

/// One persisted annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    pub color: Color,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub geometry: Geometry,
}

impl Shape {
    pub fn new(id: ShapeId, color: Color, geometry: Geometry) -> Self {
        Self {
            id,
            color,
            locked: false,
            description: String::new(),
            geometry,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Whether the shape exposes resize handles. Incomplete bidirectional
    /// shapes never do.
    pub fn is_resizable(&self) -> bool {
        match &self.geometry {
            Geometry::Bidirectional(b) => b.complete && b.points.len() == 4,
            _ => true,
        }
    }
}

//! Drag gestures on the active shape.

use crate::model::{AnnotationGeometry, Handle, Point, Shape, ShapeId};

/// What a drag does to the shape it grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Translate all geometry by the pointer delta
    Move,
    /// Resize or reposition through a named handle
    Handle(Handle),
}

impl std::fmt::Display for DragMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DragMode::Move => write!(f, "move"),
            DragMode::Handle(handle) => write!(f, "{}", handle),
        }
    }
}

/// An in-flight drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub shape_id: ShapeId,
    pub mode: DragMode,
    /// Pointer position when the drag started
    pub origin: Point,
    /// Last sampled pointer position
    pub last: Point,
    /// Whether any sample changed the geometry
    pub changed: bool,
}

impl DragState {
    pub fn new(shape_id: ShapeId, mode: DragMode, origin: Point) -> Self {
        Self {
            shape_id,
            mode,
            origin,
            last: origin,
            changed: false,
        }
    }
}

/// Applies one pointer sample to `shape`. Returns true if geometry changed.
pub fn apply_drag(shape: &mut Shape, mode: DragMode, pointer: Point, last: Point, floor: f64) -> bool {
    let dx = pointer.x - last.x;
    let dy = pointer.y - last.y;
    match mode {
        DragMode::Move => {
            if dx == 0.0 && dy == 0.0 {
                return false;
            }
            shape.geometry.translate(dx, dy);
            true
        }
        DragMode::Handle(handle) => shape.geometry.drag_handle(handle, pointer, dx, dy, floor),
    }
}

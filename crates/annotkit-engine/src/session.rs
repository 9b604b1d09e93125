//! Viewer session: the explicit state owned by one viewer instance.
//!
//! Holds the shape collection (in z-order, last drawn on top), the active
//! shape id, and the interaction mode. There is no process-wide state; each
//! viewer owns its own session.

use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::interaction::{DragState, Mode};
use crate::model::{Shape, ShapeId};

/// Largest id the generator can produce (the millisecond clock is an `i64`).
/// Stored ids above it are renumbered on load.
pub const MAX_SHAPE_ID: ShapeId = i64::MAX as ShapeId;

/// Hands out creation-order ids: the current millisecond timestamp, bumped so
/// ids stay strictly increasing within a session.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: ShapeId,
}

impl IdGenerator {
    pub fn next_id(&mut self) -> ShapeId {
        let now = chrono::Utc::now().timestamp_millis().max(0) as ShapeId;
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    /// Records an id that already exists so later ids stay unique. Ids above
    /// [`MAX_SHAPE_ID`] are ignored.
    pub fn observe(&mut self, id: ShapeId) {
        if id <= MAX_SHAPE_ID {
            self.last = self.last.max(id);
        }
    }
}

/// State of one annotation viewer.
#[derive(Debug, Clone)]
pub struct AnnotationSession {
    pub(crate) shapes: Vec<Shape>,
    pub(crate) active_id: Option<ShapeId>,
    pub(crate) mode: Mode,
    pub(crate) ids: IdGenerator,
    pub(crate) config: EngineConfig,
    pub(crate) hover: Option<crate::model::Point>,
    pub(crate) pointer_scale: f64,
}

impl AnnotationSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            shapes: Vec::new(),
            active_id: None,
            mode: Mode::Idle,
            ids: IdGenerator::default(),
            config,
            hover: None,
            pointer_scale: 1.0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sets how many image units one screen pixel spans, so pointer
    /// tolerances stay constant on screen at any zoom.
    pub fn set_pointer_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.pointer_scale = scale;
        }
    }

    pub fn pointer_scale(&self) -> f64 {
        self.pointer_scale
    }

    /// Boundary hit tolerance in image units.
    pub fn hit_threshold(&self) -> f64 {
        self.config.hit_threshold * self.pointer_scale
    }

    /// Handle half-extent in image units.
    pub fn handle_size(&self) -> f64 {
        self.config.handle_size * self.pointer_scale
    }

    /// Shapes in z-order (last is topmost).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub(crate) fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn active_id(&self) -> Option<ShapeId> {
        self.active_id
    }

    pub fn active_shape(&self) -> Option<&Shape> {
        self.active_id.and_then(|id| self.shape(id))
    }

    /// Last pointer position seen outside of a drag, in image space.
    pub fn hover(&self) -> Option<crate::model::Point> {
        self.hover
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        match &self.mode {
            Mode::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.mode, Mode::Drawing { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, Mode::Dragging(_))
    }

    /// Replaces the whole collection, e.g. after loading from the store.
    /// Resets selection and any in-flight gesture. Duplicate ids and ids
    /// above [`MAX_SHAPE_ID`] get fresh ones.
    pub fn replace_shapes(&mut self, mut shapes: Vec<Shape>) {
        let mut seen = HashSet::new();
        let mut renumber = Vec::new();
        for (i, shape) in shapes.iter().enumerate() {
            if shape.id > MAX_SHAPE_ID || !seen.insert(shape.id) {
                renumber.push(i);
            } else {
                self.ids.observe(shape.id);
            }
        }
        for i in renumber {
            let id = self.ids.next_id();
            tracing::warn!(old = shapes[i].id, new = id, "Renumbering stored shape id");
            shapes[i].id = id;
        }
        tracing::debug!(count = shapes.len(), "Replacing annotation collection");
        self.shapes = shapes;
        self.active_id = None;
        self.mode = Mode::Idle;
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Circle, Geometry, Point, PALETTE};

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdGenerator::default();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_out_of_range_ids_are_renumbered() {
        let mut s = AnnotationSession::new(EngineConfig::default());
        let circle = |id| {
            Shape::new(
                id,
                PALETTE[0],
                Geometry::Circle(Circle::new(Point::new(50.0, 50.0), 20.0)),
            )
        };
        s.replace_shapes(vec![circle(u64::MAX), circle(7), circle(7)]);

        let ids: Vec<ShapeId> = s.shapes().iter().map(|sh| sh.id).collect();
        assert_eq!(ids[1], 7);
        assert!(ids[0] <= MAX_SHAPE_ID && ids[0] != 7);
        assert!(ids[2] <= MAX_SHAPE_ID && ids[2] != 7 && ids[2] != ids[0]);
        assert!(s.ids.next_id() > ids[0].max(ids[2]));
    }

    #[test]
    fn test_generator_saturates_instead_of_overflowing() {
        let mut ids = IdGenerator { last: u64::MAX };
        assert_eq!(ids.next_id(), u64::MAX);
    }

    #[test]
    fn test_tolerances_follow_pointer_scale() {
        let mut s = AnnotationSession::new(EngineConfig::default());
        assert_eq!(s.hit_threshold(), 5.0);
        s.set_pointer_scale(4.0);
        assert_eq!((s.hit_threshold(), s.handle_size()), (20.0, 40.0));
        s.set_pointer_scale(0.0);
        assert_eq!(s.pointer_scale(), 4.0);
    }

    #[test]
    fn test_observed_ids_are_not_reused() {
        let mut ids = IdGenerator::default();
        ids.observe(u64::MAX / 2);
        assert!(ids.next_id() > u64::MAX / 2);
    }
}

//! Out-of-band edits: lock toggle, delete, description and color edits, and
//! list-driven selection. These bypass the pointer flow, end any gesture in
//! progress, and mutate the collection directly.

use super::InteractionOutcome;
use crate::model::{Color, ShapeId};
use crate::session::AnnotationSession;

impl AnnotationSession {
    /// Flips the lock flag. Locked shapes are rendered solid, without handles,
    /// and are invisible to hit-testing.
    pub fn toggle_lock(&mut self, id: ShapeId) -> InteractionOutcome {
        let prior = self.abandon_gesture();
        match self.shape_mut(id) {
            Some(shape) => {
                shape.locked = !shape.locked;
                tracing::debug!(id, locked = shape.locked, "Lock toggled");
                prior.merge(InteractionOutcome::debounced())
            }
            None => prior,
        }
    }

    pub fn delete_shape(&mut self, id: ShapeId) -> InteractionOutcome {
        let prior = self.abandon_gesture();
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id != id);
        if self.shapes.len() == before {
            return prior;
        }
        if self.active_id == Some(id) {
            self.active_id = None;
        }
        tracing::debug!(id, "Shape deleted");
        prior.merge(InteractionOutcome::debounced())
    }

    pub fn set_description(&mut self, id: ShapeId, description: &str) -> InteractionOutcome {
        let prior = self.abandon_gesture();
        match self.shape_mut(id) {
            Some(shape) if shape.description != description => {
                shape.description = description.to_string();
                prior.merge(InteractionOutcome::debounced())
            }
            _ => prior,
        }
    }

    pub fn set_color(&mut self, id: ShapeId, color: Color) -> InteractionOutcome {
        let prior = self.abandon_gesture();
        match self.shape_mut(id) {
            Some(shape) if shape.color != color => {
                shape.color = color;
                prior.merge(InteractionOutcome::debounced())
            }
            _ => prior,
        }
    }

    /// Selection from the shape list. Unlike canvas clicks this may select a
    /// locked shape, which then shows its label but no handles.
    pub fn set_active(&mut self, id: Option<ShapeId>) -> InteractionOutcome {
        let prior = self.abandon_gesture();
        let id = id.filter(|id| self.shape(*id).is_some());
        if id == self.active_id {
            return prior;
        }
        self.active_id = id;
        prior.merge(InteractionOutcome::redraw())
    }

    /// Ends any drag or drawing gesture, keeping the selection.
    pub fn cancel_gesture(&mut self) -> InteractionOutcome {
        self.abandon_gesture()
    }

    /// Removes every shape.
    pub fn clear(&mut self) -> InteractionOutcome {
        let prior = self.abandon_gesture();
        if self.shapes.is_empty() {
            return prior;
        }
        self.shapes.clear();
        self.active_id = None;
        prior.merge(InteractionOutcome::debounced())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::interaction::{InteractionState, PersistRequest};
    use crate::model::{Point, ShapeKind, PALETTE};
    use crate::session::AnnotationSession;

    fn session_with_circle() -> (AnnotationSession, u64) {
        let mut s = AnnotationSession::new(EngineConfig::default());
        s.select_tool(Some(ShapeKind::Circle), PALETTE[0]);
        s.pointer_down(Point::new(100.0, 100.0));
        let id = s.shapes()[0].id;
        (s, id)
    }

    #[test]
    fn test_delete_clears_active() {
        let (mut s, id) = session_with_circle();
        let outcome = s.delete_shape(id);
        assert_eq!(outcome.persist, PersistRequest::Debounced);
        assert!(s.is_empty());
        assert_eq!(s.state(), InteractionState::Idle);
        assert_eq!(s.delete_shape(id).persist, PersistRequest::None);
    }

    #[test]
    fn test_unchanged_description_is_not_dirty() {
        let (mut s, id) = session_with_circle();
        assert_eq!(s.set_description(id, "lesion").persist, PersistRequest::Debounced);
        assert_eq!(s.set_description(id, "lesion").persist, PersistRequest::None);
        assert_eq!(s.shape(id).map(|s| s.description.as_str()), Some("lesion"));
    }

    #[test]
    fn test_lock_mid_drag_flushes_drag() {
        let (mut s, id) = session_with_circle();
        s.pointer_down(Point::new(150.0, 100.0));
        s.pointer_move(Point::new(160.0, 100.0));
        let outcome = s.toggle_lock(id);
        assert_eq!(outcome.persist, PersistRequest::Immediate);
        assert!(!s.is_dragging());
        assert_eq!(s.shape(id).map(|s| s.locked), Some(true));
    }

    #[test]
    fn test_list_can_select_locked_shape() {
        let (mut s, id) = session_with_circle();
        s.toggle_lock(id);
        s.set_active(None);
        s.set_active(Some(id));
        assert_eq!(s.active_id(), Some(id));
        s.set_active(Some(42));
        assert_eq!(s.active_id(), None);
    }
}

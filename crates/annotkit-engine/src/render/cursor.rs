use crate::hit_test::find_handle_at_point;
use crate::model::{AnnotationGeometry, Point};
use crate::session::AnnotationSession;

/// Pointer cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Grabbing,
    Move,
}

impl Cursor {
    /// CSS / GDK cursor name.
    pub fn name(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Crosshair => "crosshair",
            Cursor::Grabbing => "grabbing",
            Cursor::Move => "move",
        }
    }
}

/// Cursor for the pointer at `hover` (image space).
pub fn cursor_for(session: &AnnotationSession, hover: Point) -> Cursor {
    if session.is_drawing() {
        return Cursor::Crosshair;
    }
    if session.is_dragging() {
        return Cursor::Grabbing;
    }
    match session.active_shape() {
        Some(active)
            if !active.locked
                && (find_handle_at_point(active, hover, session.handle_size()).is_some()
                    || active.geometry.near_boundary(hover, session.hit_threshold())) =>
        {
            Cursor::Move
        }
        _ => Cursor::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::model::{ShapeKind, PALETTE};

    #[test]
    fn test_cursor_follows_mode() {
        let mut s = AnnotationSession::new(EngineConfig::default());
        assert_eq!(cursor_for(&s, Point::new(0.0, 0.0)), Cursor::Default);

        s.select_tool(Some(ShapeKind::Circle), PALETTE[0]);
        assert_eq!(cursor_for(&s, Point::new(0.0, 0.0)), Cursor::Crosshair);

        s.pointer_down(Point::new(100.0, 100.0));
        assert_eq!(cursor_for(&s, Point::new(150.0, 100.0)), Cursor::Move);
        assert_eq!(cursor_for(&s, Point::new(300.0, 300.0)), Cursor::Default);

        s.pointer_down(Point::new(150.0, 100.0));
        assert_eq!(cursor_for(&s, Point::new(150.0, 100.0)), Cursor::Grabbing);
        assert_eq!(Cursor::Grabbing.name(), "grabbing");
    }

    #[test]
    fn test_locked_active_shape_shows_default() {
        let mut s = AnnotationSession::new(EngineConfig::default());
        s.select_tool(Some(ShapeKind::Circle), PALETTE[0]);
        s.pointer_down(Point::new(100.0, 100.0));
        if let Some(id) = s.active_id() {
            s.toggle_lock(id);
        }
        assert_eq!(cursor_for(&s, Point::new(150.0, 100.0)), Cursor::Default);
    }
}

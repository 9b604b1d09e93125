//! Interaction state machine.
//!
//! Pointer events (already mapped to image space) drive the lifecycle of
//! drawing a new shape, selecting an existing one, and dragging the active
//! shape. Every handler returns an [`InteractionOutcome`] telling the host
//! whether to redraw and how urgently to persist.
//!
//! ```text
//! Idle ──select_tool──▶ Drawing ──placement──▶ ActiveSelected
//!   ▲                                              │  ▲
//!   └───────────click on empty space───────────────┘  │
//!                         press on handle/outline ▼   │ release
//!                                              Dragging
//! ```

mod actions;
mod drag;

pub use drag::{apply_drag, DragMode, DragState};

use crate::hit_test::{find_handle_at_point, find_shape_at_point};
use crate::model::{
    AnnotationGeometry, Bidirectional, Circle, Color, Ellipse, Geometry, Point, Rectangle, Shape,
    ShapeId, ShapeKind,
};
use crate::session::AnnotationSession;

/// Internal mode. Selection is tracked separately as `active_id`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mode {
    Idle,
    Drawing {
        tool: ShapeKind,
        color: Color,
        in_progress: Option<ShapeId>,
    },
    Dragging(DragState),
}

/// Observable state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Drawing {
        tool: ShapeKind,
        in_progress: Option<ShapeId>,
    },
    ActiveSelected(ShapeId),
    Dragging {
        shape_id: ShapeId,
        mode: DragMode,
    },
}

/// How soon a mutation should reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistRequest {
    #[default]
    None,
    /// Schedule a save after the quiet window
    Debounced,
    /// Save right away (end of a drag)
    Immediate,
}

/// Side effects the host must carry out after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionOutcome {
    pub redraw: bool,
    pub persist: PersistRequest,
}

impl InteractionOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            redraw: true,
            persist: PersistRequest::None,
        }
    }

    pub fn debounced() -> Self {
        Self {
            redraw: true,
            persist: PersistRequest::Debounced,
        }
    }

    pub fn immediate() -> Self {
        Self {
            redraw: true,
            persist: PersistRequest::Immediate,
        }
    }

    /// Combines two outcomes, keeping the more urgent persistence request.
    pub fn merge(self, other: InteractionOutcome) -> Self {
        let persist = match (self.persist, other.persist) {
            (PersistRequest::Immediate, _) | (_, PersistRequest::Immediate) => {
                PersistRequest::Immediate
            }
            (PersistRequest::Debounced, _) | (_, PersistRequest::Debounced) => {
                PersistRequest::Debounced
            }
            _ => PersistRequest::None,
        };
        Self {
            redraw: self.redraw || other.redraw,
            persist,
        }
    }
}

impl AnnotationSession {
    pub fn state(&self) -> InteractionState {
        match &self.mode {
            Mode::Drawing {
                tool, in_progress, ..
            } => InteractionState::Drawing {
                tool: *tool,
                in_progress: *in_progress,
            },
            Mode::Dragging(drag) => InteractionState::Dragging {
                shape_id: drag.shape_id,
                mode: drag.mode,
            },
            Mode::Idle => match self.active_id {
                Some(id) => InteractionState::ActiveSelected(id),
                None => InteractionState::Idle,
            },
        }
    }

    /// Toolbar tool selection. `None` deselects the tool.
    ///
    /// Entering drawing mode clears the active selection. Switching away from
    /// an unfinished bidirectional measurement discards it.
    pub fn select_tool(&mut self, tool: Option<ShapeKind>, color: Color) -> InteractionOutcome {
        let mut outcome = self.abandon_gesture();
        match tool {
            Some(tool) => {
                tracing::debug!(%tool, "Entering drawing mode");
                self.active_id = None;
                self.mode = Mode::Drawing {
                    tool,
                    color,
                    in_progress: None,
                };
            }
            None => {
                self.mode = Mode::Idle;
            }
        }
        outcome.redraw = true;
        outcome
    }

    /// Changes the color of the shape about to be placed. An unfinished
    /// bidirectional measurement takes the new color too. No-op outside
    /// drawing mode.
    pub fn set_drawing_color(&mut self, new_color: Color) -> InteractionOutcome {
        let Mode::Drawing {
            color, in_progress, ..
        } = &mut self.mode
        else {
            return InteractionOutcome::none();
        };
        *color = new_color;
        let in_progress = *in_progress;
        match in_progress.and_then(|id| self.shape_mut(id)) {
            Some(shape) => {
                shape.color = new_color;
                InteractionOutcome::redraw()
            }
            None => InteractionOutcome::none(),
        }
    }

    /// Ends any drag or drawing gesture. An unfinished bidirectional shape
    /// is removed.
    pub(crate) fn abandon_gesture(&mut self) -> InteractionOutcome {
        let previous = std::mem::replace(&mut self.mode, Mode::Idle);
        match previous {
            Mode::Drawing {
                in_progress: Some(id),
                ..
            } => {
                let before = self.shapes.len();
                self.shapes.retain(|s| s.id != id);
                if self.shapes.len() != before {
                    tracing::debug!(id, "Discarding unfinished bidirectional measurement");
                    InteractionOutcome::debounced()
                } else {
                    InteractionOutcome::none()
                }
            }
            Mode::Dragging(drag) if drag.changed => InteractionOutcome::immediate(),
            _ => InteractionOutcome::none(),
        }
    }

    pub fn pointer_down(&mut self, p: Point) -> InteractionOutcome {
        self.hover = Some(p);
        match self.mode.clone() {
            Mode::Drawing {
                tool,
                color,
                in_progress,
            } => self.place(tool, color, in_progress, p),
            Mode::Dragging(_) => {
                // Missed release: finish the old drag before handling the press.
                let finished = self.finish_drag(p);
                finished.merge(self.press_while_idle(p))
            }
            Mode::Idle => self.press_while_idle(p),
        }
    }

    pub fn pointer_move(&mut self, p: Point) -> InteractionOutcome {
        let floor = self.config.min_size;
        match &mut self.mode {
            Mode::Dragging(drag) => {
                let drag_mode = drag.mode;
                let last = drag.last;
                let shape_id = drag.shape_id;
                drag.last = p;
                let changed = match self.shapes.iter_mut().find(|s| s.id == shape_id) {
                    Some(shape) => apply_drag(shape, drag_mode, p, last, floor),
                    None => false,
                };
                if changed {
                    drag.changed = true;
                    InteractionOutcome::redraw()
                } else {
                    InteractionOutcome::none()
                }
            }
            Mode::Drawing {
                in_progress: Some(id),
                ..
            } => {
                let id = *id;
                self.hover = Some(p);
                match self.shape_mut(id).map(|s| &mut s.geometry) {
                    Some(Geometry::Bidirectional(b)) if b.awaiting_segment_end() => {
                        b.preview_point = Some(p);
                        InteractionOutcome::redraw()
                    }
                    _ => InteractionOutcome::none(),
                }
            }
            _ => {
                self.hover = Some(p);
                InteractionOutcome::none()
            }
        }
    }

    pub fn pointer_up(&mut self, p: Point) -> InteractionOutcome {
        self.hover = Some(p);
        match self.mode {
            Mode::Dragging(_) => self.finish_drag(p),
            _ => InteractionOutcome::none(),
        }
    }

    fn finish_drag(&mut self, p: Point) -> InteractionOutcome {
        let tail = self.pointer_move(p);
        let Mode::Dragging(drag) = std::mem::replace(&mut self.mode, Mode::Idle) else {
            return tail;
        };
        tracing::debug!(id = drag.shape_id, mode = %drag.mode, changed = drag.changed, "Drag finished");
        if drag.changed {
            InteractionOutcome::immediate()
        } else {
            InteractionOutcome::redraw()
        }
    }

    /// Press outside drawing mode: grab the active shape or change selection.
    fn press_while_idle(&mut self, p: Point) -> InteractionOutcome {
        let threshold = self.hit_threshold();
        let handle_size = self.handle_size();

        let grab = self.active_shape().filter(|s| !s.locked).and_then(|active| {
            find_handle_at_point(active, p, handle_size)
                .map(DragMode::Handle)
                .or_else(|| {
                    active
                        .geometry
                        .near_boundary(p, threshold)
                        .then_some(DragMode::Move)
                })
                .map(|mode| (active.id, mode))
        });
        if let Some((id, mode)) = grab {
            tracing::debug!(id, %mode, "Drag started");
            self.mode = Mode::Dragging(DragState::new(id, mode, p));
            return InteractionOutcome::redraw();
        }

        let hit = find_shape_at_point(&self.shapes, p, threshold).map(|s| s.id);
        if hit == self.active_id {
            return InteractionOutcome::none();
        }
        tracing::debug!(?hit, "Selection changed");
        self.active_id = hit;
        InteractionOutcome::redraw()
    }

    /// Placement click while a drawing tool is selected.
    fn place(
        &mut self,
        tool: ShapeKind,
        color: Color,
        in_progress: Option<ShapeId>,
        p: Point,
    ) -> InteractionOutcome {
        let cfg = &self.config;
        let geometry = match tool {
            ShapeKind::Circle => Geometry::Circle(Circle::new(p, cfg.default_circle_radius)),
            ShapeKind::Rectangle => Geometry::Rectangle(Rectangle::new(
                p,
                cfg.default_rectangle_width,
                cfg.default_rectangle_height,
            )),
            ShapeKind::Ellipse => Geometry::Ellipse(Ellipse::new(
                p,
                cfg.default_ellipse_width,
                cfg.default_ellipse_height,
            )),
            ShapeKind::Bidirectional => return self.place_caliper_point(color, in_progress, p),
        };

        let id = self.ids.next_id();
        self.shapes.push(Shape::new(id, color, geometry));
        self.active_id = Some(id);
        self.mode = Mode::Idle;
        tracing::debug!(id, %tool, "Shape created");
        InteractionOutcome::debounced()
    }

    fn place_caliper_point(
        &mut self,
        color: Color,
        in_progress: Option<ShapeId>,
        p: Point,
    ) -> InteractionOutcome {
        let existing = in_progress.and_then(|id| {
            self.shape_mut(id).and_then(|s| match &mut s.geometry {
                Geometry::Bidirectional(b) => Some((id, b.push_point(p))),
                _ => None,
            })
        });

        match existing {
            Some((id, true)) => {
                tracing::debug!(id, "Bidirectional measurement complete");
                self.active_id = Some(id);
                self.mode = Mode::Idle;
            }
            Some((_, false)) => {}
            None => {
                let id = self.ids.next_id();
                self.shapes.push(Shape::new(
                    id,
                    color,
                    Geometry::Bidirectional(Bidirectional::start(p)),
                ));
                tracing::debug!(id, "Bidirectional measurement started");
                self.mode = Mode::Drawing {
                    tool: ShapeKind::Bidirectional,
                    color,
                    in_progress: Some(id),
                };
            }
        }
        InteractionOutcome::debounced()
    }
}

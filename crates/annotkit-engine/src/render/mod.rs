//! Render loop.
//!
//! Rendering is a pure "draw now" pass: [`build_display_list`] turns the
//! session into a list of draw commands in image space. The host re-invokes it
//! whenever the collection, the active shape, the visibility toggle or the
//! draw/drag flags change; [`FrameGate`] limits pointer-move redraws to one per
//! animation frame.
//!
//! - Unlocked outlines are dashed, locked outlines are solid
//! - Only the active shape gets a measurement label
//! - Only the active unlocked shape gets resize handles

mod cursor;
mod frame;
mod raster;

pub use cursor::{cursor_for, Cursor};
pub use frame::FrameGate;
pub use raster::{rasterize, viewport_transform};

use crate::hit_test::handle_positions;
use crate::model::{measurement_label, AnnotationGeometry, Color, Geometry, Handle, Point, Shape, ShapeId};
use crate::session::AnnotationSession;

/// Offset of the measurement label from the shape's top-right corner.
const LABEL_OFFSET: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    Solid,
    Dashed,
}

/// Outline primitive, in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
    Circle { center: Point, radius: f64 },
    Rectangle { center: Point, width: f64, height: f64 },
    Ellipse { center: Point, width: f64, height: f64 },
    Segment { from: Point, to: Point },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Outline {
        shape_id: ShapeId,
        outline: Outline,
        color: Color,
        style: StrokeStyle,
    },
    Handle {
        shape_id: ShapeId,
        handle: Handle,
        position: Point,
        size: f64,
    },
    Label {
        shape_id: ShapeId,
        position: Point,
        text: String,
        color: Color,
    },
}

/// Ordered draw commands for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn handles(&self) -> impl Iterator<Item = (Handle, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Handle {
                handle, position, ..
            } => Some((*handle, *position)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Flags that affect what gets drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Visibility toggle; hidden annotations draw nothing
    pub visible: bool,
    /// Whether handles are drawn for the active shape
    pub interactive: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            visible: true,
            interactive: true,
        }
    }
}

fn outlines(geometry: &Geometry) -> Vec<Outline> {
    match geometry {
        Geometry::Circle(c) => vec![Outline::Circle {
            center: Point::new(c.x, c.y),
            radius: c.radius,
        }],
        Geometry::Rectangle(r) => vec![Outline::Rectangle {
            center: Point::new(r.x, r.y),
            width: r.width,
            height: r.height,
        }],
        Geometry::Ellipse(e) => vec![Outline::Ellipse {
            center: Point::new(e.x, e.y),
            width: e.width,
            height: e.height,
        }],
        Geometry::Bidirectional(b) => b
            .segments()
            .into_iter()
            .chain(b.preview_segment())
            .map(|(from, to)| Outline::Segment { from, to })
            .collect(),
    }
}

fn push_shape(list: &mut DisplayList, shape: &Shape) {
    let style = if shape.locked {
        StrokeStyle::Solid
    } else {
        StrokeStyle::Dashed
    };
    for outline in outlines(&shape.geometry) {
        list.commands.push(DrawCommand::Outline {
            shape_id: shape.id,
            outline,
            color: shape.color,
            style,
        });
    }
}

/// Builds the draw commands for the current session state.
pub fn build_display_list(session: &AnnotationSession, options: RenderOptions) -> DisplayList {
    let mut list = DisplayList::default();
    if !options.visible {
        return list;
    }

    for shape in session.shapes() {
        push_shape(&mut list, shape);
    }

    let Some(active) = session.active_shape() else {
        return list;
    };

    let precision = session.config().label_precision;
    if let (Some(text), Some((_, min_y, max_x, _))) =
        (measurement_label(active, precision), active.geometry.bounds())
    {
        list.commands.push(DrawCommand::Label {
            shape_id: active.id,
            position: Point::new(max_x + LABEL_OFFSET, min_y - LABEL_OFFSET),
            text,
            color: active.color,
        });
    }

    if options.interactive && !active.locked {
        let size = session.handle_size();
        for (handle, position) in handle_positions(active) {
            list.commands.push(DrawCommand::Handle {
                shape_id: active.id,
                handle,
                position,
                size,
            });
        }
    }

    list
}

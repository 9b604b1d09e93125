//! Software rasterizer for display lists.
//!
//! Draws outlines and handles into a `tiny-skia` pixmap using the viewport's
//! image → screen transform. Labels are skipped; text is drawn by the host.

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform};

use super::{DisplayList, DrawCommand, Outline, StrokeStyle};
use crate::model::{Color, Point};
use crate::viewport::Viewport;

/// Outline width in screen pixels.
const STROKE_WIDTH: f32 = 2.0;
const DASH: [f32; 2] = [6.0, 4.0];

fn handle_color() -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(255, 255, 255, 230)
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;
    paint
}

/// Image → screen transform of `viewport` as a tiny-skia transform.
pub fn viewport_transform(viewport: &Viewport) -> Transform {
    let (a, b, tx, ty) = viewport.affine();
    Transform::from_row(a as f32, b as f32, -b as f32, a as f32, tx as f32, ty as f32)
}

fn outline_path(outline: &Outline) -> Option<tiny_skia::Path> {
    match *outline {
        Outline::Circle { center, radius } => {
            PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        }
        Outline::Rectangle {
            center,
            width,
            height,
        } => centered_rect(center, width, height).map(PathBuilder::from_rect),
        Outline::Ellipse {
            center,
            width,
            height,
        } => centered_rect(center, width, height).and_then(PathBuilder::from_oval),
        Outline::Segment { from, to } => {
            let mut pb = PathBuilder::new();
            pb.move_to(from.x as f32, from.y as f32);
            pb.line_to(to.x as f32, to.y as f32);
            pb.finish()
        }
    }
}

fn centered_rect(center: Point, width: f64, height: f64) -> Option<Rect> {
    Rect::from_xywh(
        (center.x - width / 2.0) as f32,
        (center.y - height / 2.0) as f32,
        width as f32,
        height as f32,
    )
}

/// Rasterizes `list` onto a transparent `width` x `height` pixmap.
///
/// Returns `None` if the pixmap cannot be allocated (zero size).
pub fn rasterize(list: &DisplayList, viewport: &Viewport, width: u32, height: u32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;
    let transform = viewport_transform(viewport);
    // keep the stroke width constant on screen
    let zoom = viewport.zoom().max(f64::EPSILON) as f32;

    for command in &list.commands {
        match command {
            DrawCommand::Outline {
                outline,
                color,
                style,
                ..
            } => {
                let Some(path) = outline_path(outline) else {
                    continue;
                };
                let dash = match style {
                    StrokeStyle::Dashed => {
                        StrokeDash::new(DASH.iter().map(|d| d / zoom).collect(), 0.0)
                    }
                    StrokeStyle::Solid => None,
                };
                let stroke = Stroke {
                    width: STROKE_WIDTH / zoom,
                    dash,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &paint_for(*color), &stroke, transform, None);
            }
            DrawCommand::Handle { position, size, .. } => {
                let extent = (*size * 2.0) as f32;
                let rect = Rect::from_xywh(
                    position.x as f32 - extent / 2.0,
                    position.y as f32 - extent / 2.0,
                    extent,
                    extent,
                );
                if let Some(rect) = rect {
                    let mut paint = Paint::default();
                    paint.set_color(handle_color());
                    let path = PathBuilder::from_rect(rect);
                    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
                }
            }
            DrawCommand::Label { .. } => {}
        }
    }

    Some(pixmap)
}

use serde::{Deserialize, Serialize};

use super::{AnnotationGeometry, Handle, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            x: center.x,
            y: center.y,
            width,
            height,
        }
    }
}

/// Center + four corners + four edge midpoints of a centered box.
pub(super) fn box_handles(x: f64, y: f64, width: f64, height: f64) -> Vec<(Handle, Point)> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    vec![
        (Handle::Center, Point::new(x, y)),
        (Handle::TopLeft, Point::new(x - hw, y - hh)),
        (Handle::TopRight, Point::new(x + hw, y - hh)),
        (Handle::BottomLeft, Point::new(x - hw, y + hh)),
        (Handle::BottomRight, Point::new(x + hw, y + hh)),
        (Handle::Top, Point::new(x, y - hh)),
        (Handle::Right, Point::new(x + hw, y)),
        (Handle::Bottom, Point::new(x, y + hh)),
        (Handle::Left, Point::new(x - hw, y)),
    ]
}

/// Resizes a centered box about its center. The handle's axes pick which
/// dimension follows the pointer; the opposite side mirrors it.
pub(super) fn box_drag(
    x: &mut f64,
    y: &mut f64,
    width: &mut f64,
    height: &mut f64,
    handle: Handle,
    pointer: Point,
    floor: f64,
) {
    if handle == Handle::Center {
        *x = pointer.x;
        *y = pointer.y;
        return;
    }
    match handle.x_axis() {
        1 => *width = (2.0 * (pointer.x - *x)).max(floor),
        -1 => *width = (2.0 * (*x - pointer.x)).max(floor),
        _ => {}
    }
    match handle.y_axis() {
        1 => *height = (2.0 * (pointer.y - *y)).max(floor),
        -1 => *height = (2.0 * (*y - pointer.y)).max(floor),
        _ => {}
    }
}

impl AnnotationGeometry for Rectangle {
    fn center(&self) -> Option<Point> {
        Some(Point::new(self.x, self.y))
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        Some((self.x - hw, self.y - hh, self.x + hw, self.y + hh))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    fn handles(&self) -> Vec<(Handle, Point)> {
        box_handles(self.x, self.y, self.width, self.height)
    }

    fn near_boundary(&self, p: Point, threshold: f64) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        let (left, top, right, bottom) = (
            self.x - self.width / 2.0,
            self.y - self.height / 2.0,
            self.x + self.width / 2.0,
            self.y + self.height / 2.0,
        );
        let within_x = p.x >= left - threshold && p.x <= right + threshold;
        let within_y = p.y >= top - threshold && p.y <= bottom + threshold;

        let on_horizontal =
            within_x && ((p.y - top).abs() <= threshold || (p.y - bottom).abs() <= threshold);
        let on_vertical =
            within_y && ((p.x - left).abs() <= threshold || (p.x - right).abs() <= threshold);
        on_horizontal || on_vertical
    }

    fn drag_handle(
        &mut self,
        handle: Handle,
        pointer: Point,
        _dx: f64,
        _dy: f64,
        floor: f64,
    ) -> bool {
        let before = self.clone();
        box_drag(
            &mut self.x,
            &mut self.y,
            &mut self.width,
            &mut self.height,
            handle,
            pointer,
            floor,
        );
        *self != before
    }
}

use serde::{Deserialize, Serialize};

/// A named hit-testable point on the active shape.
///
/// Edge handles double as the circle's cardinal points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handle {
    Center,
    Right,
    Top,
    Left,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Bidirectional endpoint `0..=3`.
    Endpoint(u8),
}

impl Handle {
    /// Horizontal resize direction: -1 for left, 1 for right, 0 for none.
    pub fn x_axis(&self) -> i8 {
        match self {
            Handle::Left | Handle::TopLeft | Handle::BottomLeft => -1,
            Handle::Right | Handle::TopRight | Handle::BottomRight => 1,
            _ => 0,
        }
    }

    /// Vertical resize direction: -1 for top, 1 for bottom, 0 for none.
    pub fn y_axis(&self) -> i8 {
        match self {
            Handle::Top | Handle::TopLeft | Handle::TopRight => -1,
            Handle::Bottom | Handle::BottomLeft | Handle::BottomRight => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handle::Center => write!(f, "center"),
            Handle::Right => write!(f, "right"),
            Handle::Top => write!(f, "top"),
            Handle::Left => write!(f, "left"),
            Handle::Bottom => write!(f, "bottom"),
            Handle::TopLeft => write!(f, "top-left"),
            Handle::TopRight => write!(f, "top-right"),
            Handle::BottomLeft => write!(f, "bottom-left"),
            Handle::BottomRight => write!(f, "bottom-right"),
            Handle::Endpoint(n) => write!(f, "endpoint-{}", n),
        }
    }
}

//! Tool and color selection.

use annotkit_core::ColorError;
use annotkit_engine::{Color, ShapeKind};

/// One toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEntry {
    pub kind: ShapeKind,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toolbar {
    tool: Option<ShapeKind>,
    palette: Vec<Color>,
    color: Color,
}

impl Toolbar {
    /// Starts with the first palette color (or the default color for an empty
    /// palette) and no tool selected.
    pub fn new(palette: Vec<Color>) -> Self {
        let color = palette.first().copied().unwrap_or_default();
        Self {
            tool: None,
            palette,
            color,
        }
    }

    pub fn tool(&self) -> Option<ShapeKind> {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Option<ShapeKind>) {
        self.tool = tool;
    }

    pub fn tools(&self) -> Vec<ToolEntry> {
        ShapeKind::ALL
            .iter()
            .map(|kind| ToolEntry {
                kind: *kind,
                label: kind.label(),
                selected: self.tool == Some(*kind),
            })
            .collect()
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Color given to the next shape.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Picks a palette swatch. Out-of-range indices are ignored.
    pub fn select_palette(&mut self, index: usize) -> Option<Color> {
        let color = self.palette.get(index).copied()?;
        self.color = color;
        Some(color)
    }

    /// Custom color entry (`#rrggbb`).
    pub fn set_custom_color(&mut self, hex: &str) -> Result<Color, ColorError> {
        let color = Color::from_hex(hex)?;
        self.color = color;
        Ok(color)
    }
}

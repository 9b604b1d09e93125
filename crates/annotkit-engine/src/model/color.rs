use annotkit_core::ColorError;
use serde::{Deserialize, Serialize};

/// Opaque RGB stroke color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Default annotation palette offered by the toolbar.
pub const PALETTE: [Color; 6] = [
    Color::rgb(0xe5, 0x39, 0x35),
    Color::rgb(0x43, 0xa0, 0x47),
    Color::rgb(0x1e, 0x88, 0xe5),
    Color::rgb(0xfd, 0xd8, 0x35),
    Color::rgb(0x8e, 0x24, 0xaa),
    Color::rgb(0xff, 0xff, 0xff),
];

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(value: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidFormat {
            value: value.to_string(),
        };
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        PALETTE[0]
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#1e88e5"), Ok(Color::rgb(0x1e, 0x88, 0xe5)));
        assert_eq!(Color::from_hex("FFFFFF"), Ok(Color::rgb(255, 255, 255)));
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert_eq!(Color::rgb(1, 2, 3).to_hex(), "#010203");
    }
}

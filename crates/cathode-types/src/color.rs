//! Rich-text colors and the in-band color markup.
//!
//! Responses travel through the pipeline as plain strings; decorators
//! wrap them in `<color=#RRGGBBAA>...</color>` tags that the display
//! layer understands. Parsing accepts `#RGB`-less 6- or 8-digit hex.

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string. The leading `#` is
    /// optional. Returns `None` on malformed input.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: 255,
            }),
            8 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => None,
        }
    }

    /// Uppercase `RRGGBBAA` hex representation, without a leading `#`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// A named palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorKey {
    pub key: String,
    pub color: Color,
}

impl ColorKey {
    pub fn new(key: &str, color: Color) -> Self {
        Self {
            key: key.to_string(),
            color,
        }
    }
}

/// Wrap `text` in color markup for the given color.
pub fn color_string(text: &str, color: Color) -> String {
    format!("<color=#{}>{text}</color>", color.to_hex())
}

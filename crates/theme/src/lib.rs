//! Colors for the schematic canvas.
//!
//! Colors are plain 8-bit sRGBA so any host surface can consume them.

use palette::Srgb;
use std::fmt;
use std::str::FromStr;

pub type Color = palette::Srgba<u8>;

/// Theme colors for the schematic editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Canvas background
    pub canvas_background: Color,

    /// Fill behind the selected component
    pub highlight: Color,

    /// Lines drawn between joined components
    pub wire: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            canvas_background: rgba(0xFF, 0xFF, 0xFF, 0xFF),
            highlight: rgba(0xCF, 0xCF, 0xCF, 0xFF),
            wire: rgba(0x00, 0x00, 0x00, 0xFF),
        }
    }

    pub fn dark() -> Self {
        Self {
            canvas_background: rgba(0x1A, 0x1A, 0x1A, 0xFF),
            highlight: rgba(0x4A, 0x4A, 0x4A, 0xFF),
            wire: rgba(0xE6, 0xE6, 0xE6, 0xFF),
        }
    }
}

/// Helper to create a color from 8-bit channels.
pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color::new(r, g, b, a)
}

/// Error returned when a color string can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid color '{}': expected #RRGGBB or #RRGGBBAA", self.0)
    }
}

impl std::error::Error for ParseColorError {}

/// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
pub fn parse_color(input: &str) -> Result<Color, ParseColorError> {
    let err = || ParseColorError(input.to_string());
    let hex = input.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return Err(err());
    }

    let (rgb, alpha) = match hex.len() {
        6 => (hex, 0xFF),
        8 => (
            &hex[..6],
            u8::from_str_radix(&hex[6..], 16).map_err(|_| err())?,
        ),
        _ => return Err(err()),
    };
    let rgb = Srgb::<u8>::from_str(rgb).map_err(|_| err())?;
    Ok(Color::new(rgb.red, rgb.green, rgb.blue, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_highlight_is_light_gray() {
        assert_eq!(Theme::light().highlight, rgba(0xCF, 0xCF, 0xCF, 0xFF));
    }

    #[test]
    fn test_parses_hex_colors() {
        assert_eq!(parse_color("#CFCFCF"), Ok(rgba(0xCF, 0xCF, 0xCF, 0xFF)));
        assert_eq!(parse_color("ff000080"), Ok(rgba(0xFF, 0x00, 0x00, 0x80)));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#GGGGGG").is_err());
        assert!(parse_color("#ééé").is_err());
    }
}

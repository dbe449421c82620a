//! RGBA colors used for navigation bar tinting.
//!
//! Colors are parsed from and serialized to hex strings so they can live in
//! the settings file:
//!
//! ```toml
//! [navigation]
//! default-tint-color = "#1c1c1e"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tint applied to the navigation bar when no visible content ever declared one.
pub const DEFAULT_TINT: Color = Color::rgb(0xF2, 0xF2, 0xF7);

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Errors raised when parsing a hex color string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string does not start with `#`.
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),

    /// The string has neither 6 nor 8 hex digits.
    #[error("color {0:?} must have 6 or 8 hex digits")]
    InvalidLength(String),

    /// The string contains a non hex digit.
    #[error("color {0:?} contains an invalid hex digit")]
    InvalidDigit(String),
}

impl Color {
    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xFF }
    }

    /// Creates a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Returns `true` when the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 0xFF
    }
}

impl Default for Color {
    fn default() -> Self {
        DEFAULT_TINT
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError::MissingHash(s.to_string()))?;

        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(ParseColorError::InvalidLength(s.to_string()));
        }

        let channel = |index: usize| {
            u8::from_str_radix(&digits[index..index + 2], 16)
                .map_err(|_| ParseColorError::InvalidDigit(s.to_string()))
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 0xFF };

        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_opaque_hex() {
        let color: Color = "#1c1c1e".parse().unwrap();
        assert_eq!(color, Color::rgb(0x1C, 0x1C, 0x1E));
        assert!(color.is_opaque());
    }

    #[test]
    fn test_parse_hex_with_alpha() {
        let color: Color = "#ff000080".parse().unwrap();
        assert_eq!(color, Color::rgba(0xFF, 0, 0, 0x80));
        assert_eq!(color.to_string(), "#ff000080");
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        assert!(matches!(
            "112233".parse::<Color>(),
            Err(ParseColorError::MissingHash(_))
        ));
        assert!(matches!(
            "#1234".parse::<Color>(),
            Err(ParseColorError::InvalidLength(_))
        ));
        assert!(matches!(
            "#zz0000".parse::<Color>(),
            Err(ParseColorError::InvalidDigit(_))
        ));
    }
}

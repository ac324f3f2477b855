//! RGB color value and its display formats

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::Channel;

/// Lowest channel value
pub const CHANNEL_MIN: i64 = 0;

/// Highest channel value
pub const CHANNEL_MAX: i64 = 255;

/// Constrain an arbitrary integer to a channel value
pub fn clamp_channel(value: i64) -> u8 {
    value.clamp(CHANNEL_MIN, CHANNEL_MAX) as u8
}

/// An sRGB color with 8-bit channels.
///
/// The `u8` storage makes the 0..=255 invariant hold by construction; range
/// handling for wider input lives in [`clamp_channel`] and in
/// [`crate::state::ColorState::set_channel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Color every new session starts with (`#FF5733`)
    pub const INITIAL: Color = Color::new(255, 87, 51);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
        }
    }

    pub fn set_channel(&mut self, channel: Channel, value: u8) {
        match channel {
            Channel::R => self.r = value,
            Channel::G => self.g = value,
            Channel::B => self.b = value,
        }
    }

    pub fn channels(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// `#RRGGBB`, uppercase, always 7 characters
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// `rgb(r, g, b)` with one space after each comma
    pub fn to_rgb_text(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the `#RGB` shorthand, case-insensitive
    pub fn from_hex(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(format!(
                "'{}' contains non-hex characters",
                text
            )));
        }

        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    // is_ascii_hexdigit above guarantees a digit
                    let nibble = c.to_digit(16).unwrap_or(0) as u8;
                    out[i] = nibble * 17;
                }
                Ok(Self::new(out[0], out[1], out[2]))
            }
            6 => {
                let parse = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&digits[range], 16)
                        .map_err(|e| Error::InvalidColor(format!("'{}': {}", text, e)))
                };
                Ok(Self::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
            }
            n => Err(Error::InvalidColor(format!(
                "'{}' has {} hex digits, expected 3 or 6",
                text, n
            ))),
        }
    }

    /// Parse `rgb(r, g, b)` text; whitespace around numbers is ignored.
    ///
    /// Components must already be within 0..=255.
    pub fn from_rgb_text(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| Error::InvalidColor(format!("'{}' is not rgb(r, g, b)", text)))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(Error::InvalidColor(format!(
                "'{}' has {} components, expected 3",
                text,
                parts.len()
            )));
        }

        let mut out = [0u8; 3];
        for (slot, part) in out.iter_mut().zip(parts) {
            *slot = part
                .parse::<u8>()
                .map_err(|e| Error::InvalidColor(format!("'{}': component '{}': {}", text, part, e)))?;
        }
        Ok(Self::new(out[0], out[1], out[2]))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts either hex or `rgb(...)` text
    fn from_str(s: &str) -> Result<Self> {
        if s.trim_start().starts_with("rgb(") {
            Self::from_rgb_text(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_color() {
        let color = Color::default();
        assert_eq!(color.channels(), (255, 87, 51));
        assert_eq!(color.to_hex(), "#FF5733");
        assert_eq!(color.to_rgb_text(), "rgb(255, 87, 51)");
    }

    #[test]
    fn test_hex_is_zero_padded_uppercase() {
        let color = Color::new(1, 10, 171);
        assert_eq!(color.to_hex(), "#010AAB");
        assert_eq!(color.to_hex().len(), 7);
    }

    #[test]
    fn test_rgb_text_has_no_leading_zeros() {
        assert_eq!(Color::new(0, 7, 42).to_rgb_text(), "rgb(0, 7, 42)");
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(-1), 0);
        assert_eq!(clamp_channel(i64::MIN), 0);
        assert_eq!(clamp_channel(128), 128);
        assert_eq!(clamp_channel(256), 255);
        assert_eq!(clamp_channel(i64::MAX), 255);
    }

    #[test]
    fn test_from_hex_variants() {
        assert_eq!(Color::from_hex("#FF5733").unwrap(), Color::INITIAL);
        assert_eq!(Color::from_hex("ff5733").unwrap(), Color::INITIAL);
        assert_eq!(Color::from_hex("#f00").unwrap(), Color::new(255, 0, 0));
        assert_eq!(Color::from_hex(" #0a0B0c ").unwrap(), Color::new(10, 11, 12));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(Color::from_hex("#GG0000"), Err(Error::InvalidColor(_))));
        assert!(matches!(Color::from_hex("#FF57"), Err(Error::InvalidColor(_))));
        assert!(matches!(Color::from_hex(""), Err(Error::InvalidColor(_))));
        assert!(matches!(Color::from_hex("#+F0000"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_from_rgb_text() {
        assert_eq!(
            Color::from_rgb_text("rgb(255, 87, 51)").unwrap(),
            Color::INITIAL
        );
        assert_eq!(
            Color::from_rgb_text("rgb(1,2,3)").unwrap(),
            Color::new(1, 2, 3)
        );
        assert!(Color::from_rgb_text("rgb(256, 0, 0)").is_err());
        assert!(Color::from_rgb_text("rgb(1, 2)").is_err());
        assert!(Color::from_rgb_text("hsl(1, 2, 3)").is_err());
    }

    #[test]
    fn test_hex_and_rgb_text_agree() {
        for color in [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(9, 128, 200),
            Color::INITIAL,
        ] {
            let from_hex = Color::from_hex(&color.to_hex()).unwrap();
            let from_rgb = Color::from_rgb_text(&color.to_rgb_text()).unwrap();
            assert_eq!(from_hex, from_rgb);
            assert_eq!(from_hex, color);
        }
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::new(0, 255, 0)).unwrap();
        assert_eq!(json, "\"#00FF00\"");
        let back: Color = serde_json::from_str("\"rgb(0, 255, 0)\"").unwrap();
        assert_eq!(back, Color::new(0, 255, 0));
    }
}

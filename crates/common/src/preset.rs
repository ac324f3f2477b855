//! Named preset colors
//!
//! The preset table is closed: six entries, fixed at build time. Code that
//! holds a [`Preset`] can never name an unknown one; only string lookup fails.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::color::Color;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Red,
    Green,
    Blue,
    Yellow,
    Black,
    White,
}

impl Preset {
    /// All presets in display order
    pub const ALL: [Preset; 6] = [
        Preset::Red,
        Preset::Green,
        Preset::Blue,
        Preset::Yellow,
        Preset::Black,
        Preset::White,
    ];

    pub const fn color(&self) -> Color {
        match self {
            Preset::Red => Color::new(255, 0, 0),
            Preset::Green => Color::new(0, 255, 0),
            Preset::Blue => Color::new(0, 0, 255),
            Preset::Yellow => Color::new(255, 255, 0),
            Preset::Black => Color::new(0, 0, 0),
            Preset::White => Color::new(255, 255, 255),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Preset::Red => "red",
            Preset::Green => "green",
            Preset::Blue => "blue",
            Preset::Yellow => "yellow",
            Preset::Black => "black",
            Preset::White => "white",
        }
    }

    /// Look up a preset by its key. Keys are lowercase and matched exactly.
    pub fn lookup(name: &str) -> Option<Preset> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| Error::UnknownPreset {
            name: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_table() {
        assert_eq!(Preset::Red.color().to_hex(), "#FF0000");
        assert_eq!(Preset::Green.color().to_hex(), "#00FF00");
        assert_eq!(Preset::Blue.color().to_hex(), "#0000FF");
        assert_eq!(Preset::Yellow.color().to_hex(), "#FFFF00");
        assert_eq!(Preset::Black.color().to_hex(), "#000000");
        assert_eq!(Preset::White.color().to_hex(), "#FFFFFF");
    }

    #[test]
    fn test_keys_are_unique() {
        let mut names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Preset::ALL.len());
    }

    #[test]
    fn test_parse_roundtrip_names() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_unknown_preset() {
        match "purple".parse::<Preset>() {
            Err(Error::UnknownPreset { name }) => assert_eq!(name, "purple"),
            other => panic!("expected UnknownPreset, got {:?}", other),
        }
        assert!("Red".parse::<Preset>().is_err());
    }
}

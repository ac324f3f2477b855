//! Core types for colormix

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// One of the three color channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[serde(alias = "red", alias = "R")]
    R,
    #[serde(alias = "green", alias = "G")]
    G,
    #[serde(alias = "blue", alias = "B")]
    B,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::R, Channel::G, Channel::B];

    pub fn name(&self) -> &'static str {
        match self {
            Channel::R => "red",
            Channel::G => "green",
            Channel::B => "blue",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::R => write!(f, "r"),
            Channel::G => write!(f, "g"),
            Channel::B => write!(f, "b"),
        }
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Channel::R),
            "g" | "green" => Ok(Channel::G),
            "b" | "blue" => Ok(Channel::B),
            other => Err(Error::InvalidArgument(format!(
                "unknown channel '{}' (expected r, g or b)",
                other
            ))),
        }
    }
}

/// Which formatted string a copy action places on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyFormat {
    Hex,
    Rgb,
}

impl std::fmt::Display for CopyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopyFormat::Hex => write!(f, "hex"),
            CopyFormat::Rgb => write!(f, "rgb"),
        }
    }
}

impl FromStr for CopyFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(CopyFormat::Hex),
            "rgb" => Ok(CopyFormat::Rgb),
            other => Err(Error::InvalidArgument(format!(
                "unknown copy format '{}' (expected hex or rgb)",
                other
            ))),
        }
    }
}

/// How out-of-range channel input is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelPolicy {
    /// Constrain to the nearest bound
    #[default]
    Clamp,
    /// Fail with `ChannelOutOfRange` and leave the color untouched
    Reject,
}

impl std::fmt::Display for ChannelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelPolicy::Clamp => write!(f, "clamp"),
            ChannelPolicy::Reject => write!(f, "reject"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parse() {
        assert_eq!("r".parse::<Channel>().unwrap(), Channel::R);
        assert_eq!("Green".parse::<Channel>().unwrap(), Channel::G);
        assert_eq!(" BLUE ".parse::<Channel>().unwrap(), Channel::B);
        let err = "alpha".parse::<Channel>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(err.kind(), "invalid_argument");
    }

    #[test]
    fn test_copy_format_parse() {
        assert_eq!("HEX".parse::<CopyFormat>().unwrap(), CopyFormat::Hex);
        assert_eq!("rgb".parse::<CopyFormat>().unwrap(), CopyFormat::Rgb);
        let err = "hsl".parse::<CopyFormat>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(err.kind(), "invalid_argument");
    }

    #[test]
    fn test_policy_serde() {
        let policy: ChannelPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(policy, ChannelPolicy::Reject);
        assert_eq!(ChannelPolicy::default(), ChannelPolicy::Clamp);
    }
}

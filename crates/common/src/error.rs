//! Error types for colormix

use thiserror::Error;

use crate::types::Channel;

/// Result type alias using colormix Error
pub type Result<T> = std::result::Result<T, Error>;

/// colormix error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Channel {channel} value {value} is outside 0..=255")]
    ChannelOutOfRange { channel: Channel, value: i64 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Stable snake_case name of the error kind, used by scenario files
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownPreset { .. } => "unknown_preset",
            Error::ClipboardUnavailable(_) => "clipboard_unavailable",
            Error::ChannelOutOfRange { .. } => "channel_out_of_range",
            Error::InvalidColor(_) => "invalid_color",
            Error::InvalidArgument(_) => "invalid_argument",
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
            Error::TomlDe(_) | Error::TomlSer(_) => "config",
        }
    }
}

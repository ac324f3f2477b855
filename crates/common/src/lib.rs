//! Colormix Common Library
//!
//! The RGB/Hex color-state model: channel values, display formats, the preset
//! table, copy-to-clipboard with timed feedback, and configuration.

pub mod clipboard;
pub mod color;
pub mod config;
pub mod error;
pub mod feedback;
pub mod preset;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use clipboard::{Clipboard, ClipboardBackend, DeniedClipboard, MemoryClipboard};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use color::{clamp_channel, Color};
pub use config::MixerConfig;
pub use error::{Error, Result};
pub use feedback::{CopyFeedback, FeedbackState, DEFAULT_FEEDBACK_DURATION};
pub use preset::Preset;
pub use state::{ColorSnapshot, ColorState, ColorStateBuilder};
pub use types::*;

/// Colormix version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default settings directory
pub fn default_store_path() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".colormix")
}

/// Default configuration file path
pub fn default_config_path() -> std::path::PathBuf {
    default_store_path().join("config.toml")
}

/// Home directory helper
mod dirs {
    pub fn home_dir() -> Option<std::path::PathBuf> {
        std::env::var_os("HOME").map(std::path::PathBuf::from)
    }
}

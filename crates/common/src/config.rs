//! Mixer configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::clipboard::ClipboardBackend;
use crate::color::Color;
use crate::error::Result;
use crate::feedback::DEFAULT_FEEDBACK_DURATION;
use crate::types::ChannelPolicy;

/// Mixer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    /// Color a fresh session starts with
    pub initial_color: Color,

    /// Copy feedback configuration
    pub feedback: FeedbackConfig,

    /// Channel input configuration
    pub input: InputConfig,

    /// Clipboard configuration
    pub clipboard: ClipboardConfig,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            initial_color: Color::INITIAL,
            feedback: FeedbackConfig::default(),
            input: InputConfig::default(),
            clipboard: ClipboardConfig::default(),
        }
    }
}

/// Copy feedback configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// How long the confirmation stays visible
    pub duration_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_FEEDBACK_DURATION.as_millis() as u64,
        }
    }
}

/// Channel input configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Clamp or reject out-of-range channel values
    pub channel_policy: ChannelPolicy,
}

/// Clipboard configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub backend: ClipboardBackend,
}

impl MixerConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback.duration_ms)
    }
}

//! Color state for one mixer session
//!
//! `ColorState` is the single owner of the current color. Handlers take it by
//! `&mut` for mutations and `&` for reads; nothing here is global.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clipboard::Clipboard;
use crate::color::{clamp_channel, Color, CHANNEL_MAX, CHANNEL_MIN};
use crate::config::MixerConfig;
use crate::error::{Error, Result};
use crate::feedback::{CopyFeedback, FeedbackState};
use crate::preset::Preset;
use crate::types::{Channel, ChannelPolicy, CopyFormat};

/// Serializable view of a session at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSnapshot {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub hex: String,
    pub rgb: String,
    pub feedback: FeedbackState,
}

/// Current color plus the operations that change it
pub struct ColorState {
    session_id: Uuid,
    color: Color,
    initial: Color,
    policy: ChannelPolicy,
    feedback: CopyFeedback,
    clipboard: Arc<dyn Clipboard>,
}

impl ColorState {
    /// Default session: `#FF5733`, clamping, 2s feedback
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        Self::builder(clipboard).build()
    }

    /// Session configured from a [`MixerConfig`] and its clipboard backend
    pub fn from_config(config: &MixerConfig) -> Self {
        Self::with_config(config, config.clipboard.backend.build())
    }

    /// Session configured from a [`MixerConfig`] with an explicit clipboard
    pub fn with_config(config: &MixerConfig, clipboard: Arc<dyn Clipboard>) -> Self {
        Self::builder(clipboard)
            .initial(config.initial_color)
            .policy(config.input.channel_policy)
            .feedback_duration(config.feedback_duration())
            .build()
    }

    pub fn builder(clipboard: Arc<dyn Clipboard>) -> ColorStateBuilder {
        ColorStateBuilder {
            clipboard,
            initial: Color::INITIAL,
            policy: ChannelPolicy::default(),
            feedback_duration: crate::feedback::DEFAULT_FEEDBACK_DURATION,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        self.color.channel(channel)
    }

    pub fn policy(&self) -> ChannelPolicy {
        self.policy
    }

    /// Assign one channel and return the stored value.
    ///
    /// Under [`ChannelPolicy::Clamp`] this never fails.
    pub fn set_channel(&mut self, channel: Channel, value: i64) -> Result<u8> {
        let stored = match self.policy {
            ChannelPolicy::Clamp => clamp_channel(value),
            ChannelPolicy::Reject => {
                if !(CHANNEL_MIN..=CHANNEL_MAX).contains(&value) {
                    return Err(Error::ChannelOutOfRange { channel, value });
                }
                value as u8
            }
        };

        if i64::from(stored) != value {
            debug!(session = %self.session_id, %channel, value, stored, "Clamped channel input");
        }
        self.color.set_channel(channel, stored);
        debug!(session = %self.session_id, %channel, stored, hex = %self.color, "Channel set");
        Ok(stored)
    }

    /// Replace all three channels with the preset's color
    pub fn apply_preset(&mut self, preset: Preset) {
        self.color = preset.color();
        debug!(session = %self.session_id, %preset, hex = %self.color, "Preset applied");
    }

    /// Apply a preset by key; unknown keys leave the color untouched
    pub fn apply_preset_named(&mut self, name: &str) -> Result<Preset> {
        let preset: Preset = name.parse()?;
        self.apply_preset(preset);
        Ok(preset)
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        debug!(session = %self.session_id, hex = %self.color, "Color set");
    }

    /// Parse hex text and assign it
    pub fn set_hex(&mut self, text: &str) -> Result<Color> {
        let color = Color::from_hex(text)?;
        self.set_color(color);
        Ok(color)
    }

    /// Back to the session's initial color
    pub fn reset(&mut self) {
        self.set_color(self.initial);
    }

    pub fn to_hex(&self) -> String {
        self.color.to_hex()
    }

    pub fn to_rgb_text(&self) -> String {
        self.color.to_rgb_text()
    }

    /// The string a copy in `format` would place on the clipboard
    pub fn formatted(&self, format: CopyFormat) -> String {
        match format {
            CopyFormat::Hex => self.to_hex(),
            CopyFormat::Rgb => self.to_rgb_text(),
        }
    }

    /// Write the formatted color to the clipboard and show feedback.
    ///
    /// On clipboard failure neither the color nor the feedback changes.
    pub async fn copy_to_clipboard(&self, format: CopyFormat) -> Result<String> {
        let text = self.formatted(format);

        if let Err(e) = self.clipboard.write_text(&text).await {
            warn!(
                session = %self.session_id,
                backend = self.clipboard.name(),
                "Copy failed: {}",
                e
            );
            return Err(e);
        }

        self.feedback.show(text.clone());
        Ok(text)
    }

    /// Keep the copied text available after this session stops serving it.
    ///
    /// Short-lived front ends call this before exiting.
    pub async fn hold_clipboard(&self) -> Result<()> {
        debug!(session = %self.session_id, backend = self.clipboard.name(), "Holding clipboard");
        self.clipboard.hold().await
    }

    pub fn feedback(&self) -> FeedbackState {
        self.feedback.current()
    }

    pub fn feedback_duration(&self) -> Duration {
        self.feedback.duration()
    }

    /// Receive feedback transitions, including the timed hide
    pub fn subscribe_feedback(&self) -> watch::Receiver<FeedbackState> {
        self.feedback.subscribe()
    }

    pub fn snapshot(&self) -> ColorSnapshot {
        ColorSnapshot {
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            hex: self.to_hex(),
            rgb: self.to_rgb_text(),
            feedback: self.feedback(),
        }
    }
}

impl std::fmt::Debug for ColorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorState")
            .field("session_id", &self.session_id)
            .field("color", &self.color)
            .field("policy", &self.policy)
            .field("feedback", &self.feedback)
            .field("clipboard", &self.clipboard.name())
            .finish()
    }
}

/// Builder for [`ColorState`]
pub struct ColorStateBuilder {
    clipboard: Arc<dyn Clipboard>,
    initial: Color,
    policy: ChannelPolicy,
    feedback_duration: Duration,
}

impl ColorStateBuilder {
    pub fn initial(mut self, color: Color) -> Self {
        self.initial = color;
        self
    }

    pub fn policy(mut self, policy: ChannelPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn feedback_duration(mut self, duration: Duration) -> Self {
        self.feedback_duration = duration;
        self
    }

    pub fn build(self) -> ColorState {
        let session_id = Uuid::new_v4();
        debug!(session = %session_id, initial = %self.initial, policy = %self.policy, "New color session");
        ColorState {
            session_id,
            color: self.initial,
            initial: self.initial,
            policy: self.policy,
            feedback: CopyFeedback::new(self.feedback_duration),
            clipboard: self.clipboard,
        }
    }
}

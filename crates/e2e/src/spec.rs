//! Declarative YAML scenario definitions

use colormix_common::{Channel, ChannelPolicy, Color, CopyFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{E2eError, E2eResult};

/// A complete scenario parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSpec {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering scenarios
    #[serde(default)]
    pub tags: Vec<String>,

    /// Starting color, `#FF5733` when omitted
    #[serde(default)]
    pub initial: Option<Color>,

    /// Whether the clipboard accepts writes at the start
    #[serde(default)]
    pub clipboard: ClipboardMode,

    /// Feedback visibility window, 2000 ms when omitted
    #[serde(default)]
    pub feedback_ms: Option<u64>,

    /// Channel input policy, clamp when omitted
    #[serde(default)]
    pub channel_policy: Option<ChannelPolicy>,

    /// Steps to execute in order
    pub steps: Vec<TestStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardMode {
    #[default]
    Available,
    Denied,
}

/// A single step in a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Drag one slider to a value (may be out of range)
    SetChannel { channel: Channel, value: i64 },

    /// Type a hex value
    SetHex { value: String },

    /// Click a preset button; kept as text so unknown keys can be exercised
    ApplyPreset { preset: String },

    /// Click a copy button
    Copy { format: CopyFormat },

    /// Let virtual time pass
    Wait { ms: u64 },

    /// Return to the initial color
    Reset,

    /// Grant or revoke clipboard access mid-scenario
    Clipboard { available: bool },

    /// Check the observable state
    Assert {
        #[serde(default)]
        hex: Option<String>,
        #[serde(default)]
        rgb: Option<String>,
        #[serde(default)]
        channels: Option<[u8; 3]>,
        #[serde(default)]
        feedback: Option<FeedbackExpectation>,
        #[serde(default)]
        feedback_text: Option<String>,
        #[serde(default)]
        clipboard: Option<String>,
    },

    /// Run `step` and require it to fail with the named error kind
    /// (for example `unknown_preset`) without changing the color
    ExpectError { error: String, step: Box<TestStep> },

    /// Log a message (for debugging)
    Log { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackExpectation {
    Hidden,
    Visible,
}

impl TestStep {
    /// Short label used in results and logs
    pub fn describe(&self) -> String {
        match self {
            TestStep::SetChannel { channel, value } => format!("set_channel {}={}", channel, value),
            TestStep::SetHex { value } => format!("set_hex {}", value),
            TestStep::ApplyPreset { preset } => format!("apply_preset {}", preset),
            TestStep::Copy { format } => format!("copy {}", format),
            TestStep::Wait { ms } => format!("wait {}ms", ms),
            TestStep::Reset => "reset".to_string(),
            TestStep::Clipboard { available } => format!("clipboard available={}", available),
            TestStep::Assert { .. } => "assert".to_string(),
            TestStep::ExpectError { error, step } => {
                format!("expect_error {} ({})", error, step.describe())
            }
            TestStep::Log { .. } => "log".to_string(),
        }
    }
}

impl TestSpec {
    /// Parse a scenario from YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| E2eError::SpecParse(format!("{}: {}", path.display(), e)))
    }

    /// Load one scenario file, or every `.yaml`/`.yml` under a directory
    pub fn load_all(path: &Path) -> E2eResult<Vec<Self>> {
        if path.is_file() {
            return Ok(vec![Self::from_file(path)?]);
        }
        if !path.exists() {
            return Err(E2eError::ScenarioNotFound(path.display().to_string()));
        }

        let mut specs = Vec::new();

        for entry in walkdir::WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let spec = Self::from_file(entry.path())?;
            specs.push(spec);
        }

        Ok(specs)
    }

    /// Filter scenarios by tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_spec() {
        let yaml = r##"
name: red-preset
description: Red preset sets the primary channel only
tags:
  - presets
  - smoke
steps:
  - action: apply_preset
    preset: red
  - action: assert
    hex: "#FF0000"
    rgb: rgb(255, 0, 0)
    channels: [255, 0, 0]
"##;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.name, "red-preset");
        assert_eq!(spec.steps.len(), 2);
        assert_eq!(spec.clipboard, ClipboardMode::Available);
        assert!(spec.initial.is_none());
        match &spec.steps[1] {
            TestStep::Assert { channels, hex, .. } => {
                assert_eq!(*channels, Some([255, 0, 0]));
                assert_eq!(hex.as_deref(), Some("#FF0000"));
            }
            other => panic!("expected assert, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_expect_error() {
        let yaml = r##"
name: purple
initial: "#010203"
clipboard: denied
feedback_ms: 500
channel_policy: reject
steps:
  - action: expect_error
    error: unknown_preset
    step:
      action: apply_preset
      preset: purple
  - action: reset
  - action: wait
    ms: 10
"##;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.initial, Some(Color::new(1, 2, 3)));
        assert_eq!(spec.clipboard, ClipboardMode::Denied);
        assert_eq!(spec.feedback_ms, Some(500));
        assert_eq!(spec.channel_policy, Some(ChannelPolicy::Reject));
        assert_eq!(
            spec.steps[0].describe(),
            "expect_error unknown_preset (apply_preset purple)"
        );
        assert!(matches!(spec.steps[1], TestStep::Reset));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let yaml = r#"
name: bad
steps:
  - action: navigate
    url: /
"#;
        assert!(TestSpec::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_has_tag() {
        let spec = TestSpec::from_yaml("name: a\ntags: [x, smoke]\nsteps: []\n").unwrap();
        assert!(spec.has_tag("smoke"));
        assert!(!spec.has_tag("y"));
    }
}

//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use colormix_common::{ColorSnapshot, Preset};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

impl TableDisplay for ColorSnapshot {
    fn headers() -> Vec<&'static str> {
        vec!["Swatch", "Hex", "RGB", "Feedback"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            swatch(self.r, self.g, self.b),
            self.hex.clone(),
            self.rgb.clone(),
            self.feedback.to_string(),
        ]
    }
}

/// Preset display wrapper for serialization
#[derive(Serialize)]
pub struct PresetDisplay {
    pub name: &'static str,
    pub hex: String,
    pub rgb: String,
}

impl From<Preset> for PresetDisplay {
    fn from(preset: Preset) -> Self {
        let color = preset.color();
        Self {
            name: preset.name(),
            hex: color.to_hex(),
            rgb: color.to_rgb_text(),
        }
    }
}

impl TableDisplay for PresetDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Hex", "RGB"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.name.to_string(), self.hex.clone(), self.rgb.clone()]
    }
}

/// A few terminal cells painted in the given color
pub fn swatch(r: u8, g: u8, b: u8) -> String {
    "      ".on_truecolor(r, g, b).to_string()
}

/// Render a row the way `print_item` would, without printing
pub fn render_item<T: Serialize + TableDisplay>(item: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(T::headers());
            table.add_row(item.row());

            table.to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(item).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(item).unwrap_or_default(),
        OutputFormat::Plain => T::headers()
            .iter()
            .zip(item.row())
            .map(|(header, value)| format!("{}: {}", header, value))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Print a single item
pub fn print_item<T: Serialize + TableDisplay>(item: &T, format: OutputFormat) {
    println!("{}", render_item(item, format));
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }

    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(T::headers());
            for item in items {
                table.add_row(item.row());
            }

            println!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(items).unwrap_or_default());
        }
        OutputFormat::Plain => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                let row = item.row();
                for (header, value) in T::headers().iter().zip(row.iter()) {
                    println!("{}: {}", header, value);
                }
            }
        }
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use colormix_common::FeedbackState;

    fn snapshot() -> ColorSnapshot {
        ColorSnapshot {
            r: 255,
            g: 87,
            b: 51,
            hex: "#FF5733".into(),
            rgb: "rgb(255, 87, 51)".into(),
            feedback: FeedbackState::Hidden,
        }
    }

    #[test]
    fn test_plain_output() {
        colored::control::set_override(false);
        let text = render_item(&snapshot(), OutputFormat::Plain);
        assert!(text.contains("Hex: #FF5733"));
        assert!(text.contains("RGB: rgb(255, 87, 51)"));
        assert!(text.contains("Feedback: hidden"));
    }

    #[test]
    fn test_json_output() {
        let text = render_item(&snapshot(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["hex"], "#FF5733");
        assert_eq!(value["feedback"]["state"], "hidden");
    }

    #[test]
    fn test_preset_display() {
        let display = PresetDisplay::from(Preset::Yellow);
        assert_eq!(display.row(), vec!["yellow", "#FFFF00", "rgb(255, 255, 0)"]);
    }
}

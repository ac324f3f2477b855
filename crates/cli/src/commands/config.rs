//! Config Commands

use anyhow::{bail, Result};
use clap::Subcommand;
use colormix_common::MixerConfig;
use std::path::Path;

use crate::output::{print_info, print_success, OutputFormat};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,
}

pub fn execute(
    cmd: ConfigCommands,
    path: &Path,
    config: &MixerConfig,
    format: OutputFormat,
) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            MixerConfig::default().save(path)?;
            print_success(&format!("Wrote {}", path.display()));
        }
        ConfigCommands::Show => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(config)?),
            _ => print!("{}", toml::to_string_pretty(config)?),
        },
        ConfigCommands::Path => {
            println!("{}", path.display());
            if !path.exists() {
                print_info("File does not exist; defaults are in effect");
            }
        }
    }
    Ok(())
}

//! Colormix CLI - Main Entry Point
//!
//! Drives a single color session from the command line: set channels, apply
//! presets, copy values, or run declarative scenarios against the model.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colormix_common::{ClipboardBackend, Color, ColorState, MixerConfig};
use std::path::PathBuf;
use tracing::debug;

use colormix_cli::commands::{config, mix, scenario, session};
use colormix_cli::output;

/// Colormix CLI - RGB/Hex color mixer
#[derive(Parser)]
#[command(name = "colormix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, env = "COLORMIX_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Starting color (#RRGGBB), overrides the configured initial color
    #[arg(long, global = true)]
    color: Option<String>,

    /// Disable clipboard access
    #[arg(long, global = true)]
    no_clipboard: bool,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current color
    Show,

    /// Set one channel
    Set(mix::SetArgs),

    /// Apply a named preset
    Preset(mix::PresetArgs),

    /// List the presets
    Presets,

    /// Copy the color to the clipboard
    Copy(mix::CopyArgs),

    /// Interactive session on stdin
    Session(session::SessionArgs),

    /// Run declarative scenarios against the color model
    Scenario(scenario::ScenarioArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(colormix_common::default_config_path);
    let mut mixer_config = MixerConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    debug!("Loaded config from {}", config_path.display());

    if let Some(color) = &cli.color {
        mixer_config.initial_color = color
            .parse::<Color>()
            .with_context(|| format!("--color {}", color))?;
    }
    if cli.no_clipboard {
        mixer_config.clipboard.backend = ClipboardBackend::Disabled;
    }

    let mut state = ColorState::from_config(&mixer_config);

    let result = match cli.command {
        Commands::Show => mix::show(&state, cli.format),
        Commands::Set(args) => mix::set(args, &mut state, cli.format),
        Commands::Preset(args) => mix::preset(args, &mut state, cli.format),
        Commands::Presets => mix::presets(cli.format),
        Commands::Copy(args) => mix::copy(args, &state, cli.format).await,
        Commands::Session(args) => session::execute(args, &mut state, cli.format).await,
        Commands::Scenario(args) => {
            let passed = scenario::execute(args, cli.format).await?;
            if !passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Config(cmd) => config::execute(cmd, &config_path, &mixer_config, cli.format),
        Commands::Version => {
            println!("Colormix CLI v{}", colormix_common::VERSION);
            println!("RGB/Hex color mixer with presets and copy feedback");
            Ok(())
        }
    };

    if let Err(e) = result {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

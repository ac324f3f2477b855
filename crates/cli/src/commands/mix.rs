//! One-shot color commands

use anyhow::Result;
use clap::Parser;
use colormix_common::{Channel, ColorState, CopyFormat, Preset};

use crate::output::{print_item, print_list, print_success, OutputFormat, PresetDisplay};

#[derive(Parser)]
pub struct SetArgs {
    /// Channel: r, g or b
    pub channel: Channel,

    /// New value; out-of-range values are clamped unless the config rejects them
    #[arg(allow_negative_numbers = true)]
    pub value: i64,
}

#[derive(Parser)]
pub struct PresetArgs {
    /// Preset name (red, green, blue, yellow, black, white)
    pub name: String,
}

#[derive(Parser)]
pub struct CopyArgs {
    /// What to copy: hex or rgb
    pub format: CopyFormat,
}

pub fn show(state: &ColorState, format: OutputFormat) -> Result<()> {
    print_item(&state.snapshot(), format);
    Ok(())
}

pub fn set(args: SetArgs, state: &mut ColorState, format: OutputFormat) -> Result<()> {
    state.set_channel(args.channel, args.value)?;
    show(state, format)
}

pub fn preset(args: PresetArgs, state: &mut ColorState, format: OutputFormat) -> Result<()> {
    state.apply_preset_named(&args.name)?;
    show(state, format)
}

pub fn presets(format: OutputFormat) -> Result<()> {
    let items: Vec<PresetDisplay> = Preset::ALL.into_iter().map(PresetDisplay::from).collect();
    print_list(&items, format);
    Ok(())
}

pub async fn copy(args: CopyArgs, state: &ColorState, format: OutputFormat) -> Result<()> {
    let text = state.copy_to_clipboard(args.format).await?;
    match format {
        OutputFormat::Table | OutputFormat::Plain => print_success(&format!("Copied {}", text)),
        _ => print_item(&state.snapshot(), format),
    }
    // The process is about to exit; the clipboard must not depend on it
    state.hold_clipboard().await?;
    Ok(())
}

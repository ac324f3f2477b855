//! Interactive mixing session
//!
//! Reads one command per line from stdin and applies it to a single
//! `ColorState`. Feedback transitions, including the timed hide, are printed
//! as they happen.

use anyhow::Result;
use clap::Parser;
use colormix_common::{Channel, ColorState, CopyFormat, FeedbackState};
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::output::{print_error, print_info, print_item, OutputFormat};

#[derive(Parser)]
pub struct SessionArgs {
    /// Do not print the prompt banner
    #[arg(short, long)]
    pub quiet: bool,
}

/// One line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set(Channel, i64),
    Hex(String),
    Preset(String),
    Copy(CopyFormat),
    Show,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for SessionCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();
        let arg = words.next();

        match (command.as_str(), arg) {
            ("r" | "g" | "b" | "red" | "green" | "blue", Some(value)) => {
                let channel = command
                    .parse::<Channel>()
                    .map_err(|_| ParseError::Usage("r|g|b <0-255>"))?;
                let value = value
                    .parse::<i64>()
                    .map_err(|_| ParseError::Usage("r|g|b <0-255>"))?;
                Ok(SessionCommand::Set(channel, value))
            }
            ("r" | "g" | "b" | "red" | "green" | "blue", None) => {
                Err(ParseError::Usage("r|g|b <0-255>"))
            }
            ("hex", Some(value)) => Ok(SessionCommand::Hex(value.to_string())),
            ("hex", None) => Err(ParseError::Usage("hex <#RRGGBB>")),
            ("preset", Some(name)) => Ok(SessionCommand::Preset(name.to_string())),
            ("preset", None) => Err(ParseError::Usage("preset <name>")),
            ("copy", Some(format)) => format
                .parse::<CopyFormat>()
                .map(SessionCommand::Copy)
                .map_err(|_| ParseError::Usage("copy hex|rgb")),
            ("copy", None) => Ok(SessionCommand::Copy(CopyFormat::Hex)),
            ("show", _) => Ok(SessionCommand::Show),
            ("reset", _) => Ok(SessionCommand::Reset),
            ("help" | "?", _) => Ok(SessionCommand::Help),
            ("quit" | "exit" | "q", _) => Ok(SessionCommand::Quit),
            (other, _) => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

/// Whether the session keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command; errors are the color state's own
pub async fn apply(
    command: SessionCommand,
    state: &mut ColorState,
) -> colormix_common::Result<Flow> {
    match command {
        SessionCommand::Set(channel, value) => {
            state.set_channel(channel, value)?;
        }
        SessionCommand::Hex(text) => {
            state.set_hex(&text)?;
        }
        SessionCommand::Preset(name) => {
            state.apply_preset_named(&name)?;
        }
        SessionCommand::Copy(format) => {
            state.copy_to_clipboard(format).await?;
        }
        SessionCommand::Reset => state.reset(),
        SessionCommand::Show | SessionCommand::Help => {}
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

const HELP: &str = "\
commands:
  r|g|b <value>    set a channel
  hex <#RRGGBB>    set all channels from hex
  preset <name>    red, green, blue, yellow, black, white
  copy [hex|rgb]   copy to the clipboard
  show             print the current color
  reset            back to the initial color
  quit";

pub async fn execute(args: SessionArgs, state: &mut ColorState, format: OutputFormat) -> Result<()> {
    if !args.quiet {
        print_info("Interactive session; type 'help' for commands");
        print_item(&state.snapshot(), format);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut feedback = state.subscribe_feedback();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed, ending session");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<SessionCommand>() {
                    Ok(command) => command,
                    Err(e) => {
                        print_error(&e.to_string());
                        continue;
                    }
                };

                match command {
                    SessionCommand::Help => println!("{}", HELP),
                    SessionCommand::Copy(_) => {
                        // feedback branch reports success
                        if let Err(e) = apply(command, state).await {
                            print_error(&e.to_string());
                        }
                    }
                    _ => match apply(command, state).await {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => print_item(&state.snapshot(), format),
                        Err(e) => print_error(&e.to_string()),
                    },
                }
            }
            changed = feedback.changed() => {
                if changed.is_err() {
                    break;
                }
                match feedback.borrow_and_update().clone() {
                    FeedbackState::Visible(text) => println!("📋 Copied {}", text),
                    FeedbackState::Hidden => println!("   (copy confirmation hidden)"),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colormix_common::MemoryClipboard;
    use std::sync::Arc;

    fn parse(line: &str) -> Result<SessionCommand, ParseError> {
        line.parse()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("r 10"), Ok(SessionCommand::Set(Channel::R, 10)));
        assert_eq!(parse("Blue -5"), Ok(SessionCommand::Set(Channel::B, -5)));
        assert_eq!(parse("hex #00FF00"), Ok(SessionCommand::Hex("#00FF00".into())));
        assert_eq!(
            parse("preset purple"),
            Ok(SessionCommand::Preset("purple".into()))
        );
        assert_eq!(parse("copy rgb"), Ok(SessionCommand::Copy(CopyFormat::Rgb)));
        assert_eq!(parse("copy"), Ok(SessionCommand::Copy(CopyFormat::Hex)));
        assert_eq!(parse("  quit "), Ok(SessionCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert!(matches!(parse("g ten"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("copy hsl"), Err(ParseError::Usage(_))));
        assert_eq!(parse("mix"), Err(ParseError::Unknown("mix".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_sequence() {
        let clipboard = MemoryClipboard::new();
        let mut state = ColorState::new(Arc::new(clipboard.clone()));

        for line in ["preset green", "r 300", "copy rgb"] {
            let flow = apply(parse(line).unwrap(), &mut state).await.unwrap();
            assert_eq!(flow, Flow::Continue);
        }
        assert_eq!(state.to_hex(), "#FFFF00");
        assert_eq!(clipboard.contents().as_deref(), Some("rgb(255, 255, 0)"));

        assert!(apply(parse("preset purple").unwrap(), &mut state)
            .await
            .is_err());
        assert_eq!(state.to_hex(), "#FFFF00");

        let flow = apply(SessionCommand::Quit, &mut state).await.unwrap();
        assert_eq!(flow, Flow::Quit);
    }
}

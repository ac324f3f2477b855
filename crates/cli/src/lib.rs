//! Colormix CLI
//!
//! Command-line front end for the color-state model: one-shot commands, an
//! interactive session, and scenario runs.

pub mod commands;
pub mod output;

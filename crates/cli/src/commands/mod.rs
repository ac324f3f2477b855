//! CLI Commands

pub mod config;
pub mod mix;
pub mod scenario;
pub mod session;

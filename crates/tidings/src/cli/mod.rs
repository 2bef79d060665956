//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the tidings binary.

mod ask;
mod commands;
mod config;
#[cfg(feature = "discord")]
mod run;

pub use ask::ask;
pub use commands::{Cli, Commands};
pub use config::load_config;
#[cfg(feature = "discord")]
pub use run::run_bot;

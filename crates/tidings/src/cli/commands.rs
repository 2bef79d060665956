//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tidings - jokes, memes, courses and the weather for your chat
#[derive(Parser, Debug)]
#[command(name = "tidings")]
#[command(about = "Chat bot for jokes, memes, course lookups and the weather", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load configuration from this file instead of the default locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Discord bot
    #[cfg(feature = "discord")]
    Run,

    /// Run one chat command and print the reply
    Ask {
        /// Command and arguments, e.g. `weather germantown vi`
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,

        /// Write image replies to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

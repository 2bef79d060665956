//! Chat command execution for Tidings.
//!
//! Commands are platform-agnostic: [`TidingsCommands`] implements
//! [`BotCommandExecutor`] and answers with [`Reply`] values, which each front
//! end sends in its own way.
//!
//! # Platform Support
//!
//! - `discord` - Discord bot built on Serenity (requires `discord` feature)
//!
//! The command line front end lives in the `tidings` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bot_commands;
mod commands;
mod reply;

#[cfg(feature = "discord")]
mod discord;

// Export bot command infrastructure (always available)
pub use bot_commands::{
    BotCommandError, BotCommandErrorKind, BotCommandExecutor, BotCommandResult, CommandInvocation,
};
pub use commands::TidingsCommands;
pub use reply::Reply;

// Export Discord-specific types (feature-gated)
#[cfg(feature = "discord")]
pub use discord::{DiscordError, DiscordErrorKind, DiscordResult, TidingsBot, TidingsHandler};

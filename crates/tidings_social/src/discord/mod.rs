//! Discord front end for Tidings.
//!
//! - **client**: Serenity client setup and lifecycle management
//! - **handler**: Event handler routing prefixed messages to the commands
//! - **error**: Discord-specific error types
//!
//! Available with the `discord` feature.

mod client;
mod error;
mod handler;

pub use client::TidingsBot;
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::TidingsHandler;

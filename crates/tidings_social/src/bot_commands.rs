//! Bot command execution infrastructure.
//!
//! Chat front ends (Discord, the command line) parse a message into a
//! [`CommandInvocation`] and hand it to a [`BotCommandExecutor`], which
//! answers with a [`Reply`](crate::Reply).
//!
//! # Architecture
//!
//! - `CommandInvocation` - Prefix-stripped command name plus arguments
//! - `BotCommandExecutor` - Trait for command execution
//! - `BotCommandError` - Error types for command execution failures

use crate::Reply;
use async_trait::async_trait;
use derive_getters::Getters;
use derive_more::{Display, Error};

/// Result type for bot command operations.
pub type BotCommandResult<T> = Result<T, BotCommandError>;

/// Specific bot command error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum BotCommandErrorKind {
    /// Command not found or not supported.
    #[display("Command not found: {}", _0)]
    CommandNotFound(String),

    /// Missing required argument.
    #[display("Missing required argument '{}' for command '{}'", arg_name, command)]
    MissingArgument {
        /// Command name
        command: String,
        /// Argument name
        arg_name: String,
    },

    /// Invalid argument value.
    #[display("Invalid argument '{}' for command '{}': {}", arg_name, command, reason)]
    InvalidArgument {
        /// Command name
        command: String,
        /// Argument name
        arg_name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A third-party API call failed.
    #[display("API call failed for '{}': {}", command, reason)]
    ApiError {
        /// Command name
        command: String,
        /// Diagnostic from the failed call
        reason: String,
    },
}

/// Bot command error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Bot Command Error: {} at line {} in {}", kind, line, file)]
pub struct BotCommandError {
    /// The kind of error that occurred
    pub kind: BotCommandErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BotCommandError {
    /// Create a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BotCommandErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a failed API call.
    #[track_caller]
    pub fn api(command: &str, reason: impl std::fmt::Display) -> Self {
        Self::new(BotCommandErrorKind::ApiError {
            command: command.to_string(),
            reason: reason.to_string(),
        })
    }
}

/// A command name with its whitespace-separated arguments.
///
/// # Example
///
/// ```
/// use tidings_social::CommandInvocation;
///
/// let invocation = CommandInvocation::parse("!Weather saigon vi", "!").unwrap();
/// assert_eq!(invocation.name(), "weather");
/// assert_eq!(invocation.args(), &["saigon", "vi"]);
/// assert!(CommandInvocation::parse("hello", "!").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CommandInvocation {
    name: String,
    args: Vec<String>,
}

impl CommandInvocation {
    /// Build an invocation from already separated words.
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            args,
        }
    }

    /// Parse `content` if it starts with `prefix` directly followed by a
    /// command name. The name is lowercased; arguments are kept as typed.
    pub fn parse(content: &str, prefix: &str) -> Option<Self> {
        let rest = content.trim_start().strip_prefix(prefix)?;
        if rest.starts_with(char::is_whitespace) {
            return None;
        }
        let mut words = rest.split_whitespace();
        let name = words.next()?;
        Some(Self::new(name, words.map(str::to_string).collect()))
    }

    /// Build an invocation from command-line words (`weather germantown`).
    pub fn from_words<I, S>(words: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = words
            .into_iter()
            .flat_map(|word| {
                word.as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            });
        let name = words.next()?;
        Some(Self::new(name, words.collect()))
    }
}

/// Executes chat commands.
///
/// # Tracing
///
/// Implementations instrument `execute` with the command name and argument
/// count, log at `info` when a command starts and at `warn` when an API call
/// behind it fails.
#[async_trait]
pub trait BotCommandExecutor: Send + Sync {
    /// Returns the platform or command set this executor handles.
    fn platform(&self) -> &str;

    /// Execute a command.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Command is not supported
    /// - A required argument is missing or invalid
    /// - An API call behind the command fails
    async fn execute(&self, command: &str, args: &[String]) -> BotCommandResult<Reply>;

    /// Check if this executor supports a command.
    fn supports_command(&self, command: &str) -> bool;

    /// List all supported commands.
    fn supported_commands(&self) -> Vec<String>;

    /// Get command documentation.
    fn command_help(&self, command: &str) -> Option<String>;
}

//! Tidings - a chat bot for jokes, memes, courses and the weather.
//!
//! Tidings answers chat commands by proxying third-party HTTP APIs. Slow-moving
//! data is kept in a time-gated cache so that a busy channel never hammers an
//! upstream API, and a failed refresh never loses the last good answer.
//!
//! # Crates
//!
//! - [`tidings_cache`] - `ClockGate`, `ResourceCache` and `FallbackResolver`
//! - [`tidings_sources`] - Typed API clients and configuration
//! - [`tidings_social`] - Command execution and the Discord front end
//! - [`tidings_error`] - Error types shared by all crates
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tidings::{BotCommandExecutor, Sources, TidingsCommands, TidingsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TidingsConfig::load()?;
//!     let sources = Arc::new(Sources::from_config(&config)?);
//!     let commands = TidingsCommands::new(sources, "!", 10);
//!
//!     let reply = commands.execute("weather", &["germantown".to_string()]).await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `discord` (default) - Discord bot front end

#![forbid(unsafe_code)]

pub use tidings_cache::{
    CacheLookup, CacheRecord, CatalogEntry, CatalogItem, Clock, ClockGate, ClockStamp,
    FallbackResolver, FileStore, LookupResult, ManualClock, MemoryStore, RecordStore,
    RefreshInterval, ResourceCache, SystemClock, Timestamp, search,
};
pub use tidings_error::{
    ConfigError, FetchError, FetchErrorKind, MissingFieldError, StorageError, StorageErrorKind,
    TidingsError, TidingsErrorKind, TidingsResult,
};
pub use tidings_social::{
    BotCommandError, BotCommandErrorKind, BotCommandExecutor, BotCommandResult, CommandInvocation,
    Reply, TidingsCommands,
};
pub use tidings_sources::{
    CacheConfig, CourseClient, CourseConfig, CourseDetails, DiscordConfig, GoogleTranslator,
    HttpConfig, HttpFetch, HttpResponse, JokeClient, JokeConfig, Joke, Meme, MemeClient,
    MemeConfig, MemeImage, ReqwestFetcher, Sources, SunTimes, Temperature, TidingsConfig,
    TranslationConfig, Translator, WeatherClient, WeatherConfig, WeatherReport,
};

#[cfg(feature = "discord")]
pub use tidings_social::{DiscordError, DiscordErrorKind, DiscordResult, TidingsBot, TidingsHandler};

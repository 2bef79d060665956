//! Configuration loading for the binary.

use std::path::Path;
use tidings::{TidingsConfig, TidingsResult};

/// Load configuration, then fill secrets missing from it with environment
/// variables (`OPENWEATHERMAP_API_KEY`, `DISCORD_TOKEN`).
#[tracing::instrument]
pub fn load_config(path: Option<&Path>) -> TidingsResult<TidingsConfig> {
    let config = match path {
        Some(path) => TidingsConfig::from_file(path)?,
        None => TidingsConfig::load()?,
    };

    let weather_api_key = std::env::var("OPENWEATHERMAP_API_KEY")
        .or_else(|_| std::env::var("openweathermap"))
        .ok();
    let discord_token = std::env::var("DISCORD_TOKEN").ok();

    Ok(config.with_fallback_secrets(weather_api_key, discord_token))
}

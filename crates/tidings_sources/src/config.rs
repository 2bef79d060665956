//! Configuration for Tidings.
//!
//! This module provides TOML-based configuration. Sources are merged in order,
//! later ones overriding earlier ones:
//! - Bundled defaults (include_str! from tidings.toml)
//! - User config in the home directory (~/.config/tidings/tidings.toml)
//! - User config in the current directory (./tidings.toml)
//! - Environment variables prefixed with `TIDINGS_` (`TIDINGS_WEATHER__API_KEY`)
//!
//! Secrets (`weather.api_key`, `discord.token`) are plain fields: nothing in the
//! library reads the process environment on its own.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tidings_cache::RefreshInterval;
use tidings_error::{ConfigError, TidingsResult};
use tracing::{debug, instrument};

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters, derive_builder::Builder)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct HttpConfig {
    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("tidings/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Where cached records are persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct CacheConfig {
    /// Directory for cache records (defaults to the platform cache dir)
    #[serde(default)]
    directory: Option<PathBuf>,
}

impl CacheConfig {
    /// Configured directory, or `<platform cache dir>/tidings`, or
    /// `./resources/cache` when the platform has no cache dir.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .map(|dir| dir.join("tidings"))
                .unwrap_or_else(|| PathBuf::from("resources/cache"))
        })
    }
}

/// Random joke API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct JokeConfig {
    /// Endpoint returning one random joke
    #[serde(default = "default_joke_url")]
    url: String,
}

fn default_joke_url() -> String {
    "https://official-joke-api.appspot.com/random_joke".to_string()
}

impl Default for JokeConfig {
    fn default() -> Self {
        Self {
            url: default_joke_url(),
        }
    }
}

/// Meme template API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct MemeConfig {
    /// Endpoint listing meme templates
    #[serde(default = "default_meme_url")]
    url: String,

    /// Minimum time between template list refreshes (seconds)
    #[serde(default = "default_daily")]
    refresh_secs: RefreshInterval,
}

fn default_meme_url() -> String {
    "https://api.imgflip.com/get_memes".to_string()
}

fn default_daily() -> RefreshInterval {
    RefreshInterval::DAY
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            url: default_meme_url(),
            refresh_secs: default_daily(),
        }
    }
}

/// University course catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct CourseConfig {
    /// API root; `courses/list` and `courses/{id}` are resolved against it
    #[serde(default = "default_course_base_url")]
    base_url: String,

    /// Minimum time between catalog refreshes (seconds)
    #[serde(default = "default_daily")]
    catalog_refresh_secs: RefreshInterval,

    /// Most fallback matches listed in one reply
    #[serde(default = "default_max_suggestions")]
    max_suggestions: usize,
}

fn default_course_base_url() -> String {
    "https://api.umd.io/v1/".to_string()
}

fn default_max_suggestions() -> usize {
    10
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            base_url: default_course_base_url(),
            catalog_refresh_secs: default_daily(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

/// Current weather API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct WeatherConfig {
    /// Current-weather endpoint
    #[serde(default = "default_weather_url")]
    url: String,

    /// OpenWeatherMap API key (`appid`)
    #[serde(default)]
    #[setters(strip_option)]
    api_key: Option<String>,

    /// Minimum time between refreshes of one location (seconds)
    #[serde(default = "default_weather_refresh")]
    refresh_secs: RefreshInterval,

    /// Location alias to API query (`saigon = "Ho Chi Minh City"`)
    #[serde(default = "default_locations")]
    locations: BTreeMap<String, String>,
}

fn default_weather_url() -> String {
    "http://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_weather_refresh() -> RefreshInterval {
    RefreshInterval::MINUTE
}

fn default_locations() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("germantown".to_string(), "Germantown".to_string()),
        ("saigon".to_string(), "Ho Chi Minh City".to_string()),
    ])
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            url: default_weather_url(),
            api_key: None,
            refresh_secs: default_weather_refresh(),
            locations: default_locations(),
        }
    }
}

/// Text translation API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct TranslationConfig {
    /// Translation endpoint
    #[serde(default = "default_translation_url")]
    url: String,

    /// Language the APIs answer in
    #[serde(default = "default_source_language")]
    source_language: String,

    /// Language used when a command asks for a translation without naming one
    #[serde(default = "default_target_language")]
    target_language: String,
}

fn default_translation_url() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "vi".to_string()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            url: default_translation_url(),
            source_language: default_source_language(),
            target_language: default_target_language(),
        }
    }
}

/// Discord bot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct DiscordConfig {
    /// Bot token from the Discord Developer Portal
    #[serde(default)]
    #[setters(strip_option)]
    token: Option<String>,

    /// Prefix marking a message as a command
    #[serde(default = "default_command_prefix")]
    command_prefix: String,

    /// How long the typing indicator shows before a reply (milliseconds)
    #[serde(default = "default_typing_delay_ms")]
    typing_delay_ms: u64,

    /// How long to wait for the user's answer before a punchline (seconds)
    #[serde(default = "default_reply_timeout_secs")]
    reply_timeout_secs: u64,
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_typing_delay_ms() -> u64 {
    600
}

fn default_reply_timeout_secs() -> u64 {
    120
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            command_prefix: default_command_prefix(),
            typing_delay_ms: default_typing_delay_ms(),
            reply_timeout_secs: default_reply_timeout_secs(),
        }
    }
}

/// Top-level Tidings configuration.
///
/// # Example
///
/// ```no_run
/// use tidings_sources::TidingsConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TidingsConfig::load()?;
/// println!("Weather refresh: {}s", config.weather().refresh_secs().as_secs());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct TidingsConfig {
    /// HTTP client settings
    #[serde(default)]
    http: HttpConfig,
    /// Cache persistence
    #[serde(default)]
    cache: CacheConfig,
    /// Joke API
    #[serde(default)]
    jokes: JokeConfig,
    /// Meme API
    #[serde(default)]
    memes: MemeConfig,
    /// Course catalog API
    #[serde(default)]
    courses: CourseConfig,
    /// Weather API
    #[serde(default)]
    weather: WeatherConfig,
    /// Translation API
    #[serde(default)]
    translation: TranslationConfig,
    /// Discord bot
    #[serde(default)]
    discord: DiscordConfig,
}

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../tidings.toml");

impl TidingsConfig {
    /// Load configuration from a specific file path, on top of the bundled
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> TidingsResult<Self> {
        debug!("Loading configuration from file");

        let config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?;

        Self::deserialize_checked(config)
    }

    /// Parse configuration from a TOML string, on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid configuration.
    pub fn from_toml_str(toml: &str) -> TidingsResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?;

        Self::deserialize_checked(config)
    }

    /// Load configuration with precedence: environment > current dir > home
    /// dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> TidingsResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/tidings/tidings.toml");
            builder = builder.add_source(config::File::from(home_config).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("tidings").required(false))
            .add_source(
                config::Environment::with_prefix("TIDINGS")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?;

        Self::deserialize_checked(config)
    }

    fn deserialize_checked(config: config::Config) -> TidingsResult<Self> {
        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        if parsed.discord.command_prefix.is_empty() {
            return Err(ConfigError::new("discord.command_prefix must not be empty").into());
        }
        if parsed.courses.max_suggestions == 0 {
            return Err(ConfigError::new("courses.max_suggestions must be at least 1").into());
        }

        Ok(parsed)
    }

    /// Fill secrets that are still unset, typically from environment
    /// variables the binary has read.
    pub fn with_fallback_secrets(
        mut self,
        weather_api_key: Option<String>,
        discord_token: Option<String>,
    ) -> Self {
        if self.weather.api_key.is_none() {
            self.weather.api_key = weather_api_key;
        }
        if self.discord.token.is_none() {
            self.discord.token = discord_token;
        }
        self
    }
}

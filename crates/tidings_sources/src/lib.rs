//! Typed clients for the third-party APIs behind Tidings.
//!
//! Every client talks HTTP through the [`HttpFetch`] trait, so tests can swap
//! in an in-memory fetcher. Slow-changing resources (the meme template list,
//! the course catalog, per-location weather) are wrapped in a
//! [`ResourceCache`](tidings_cache::ResourceCache).
//!
//! [`Sources`] bundles all clients built from one [`TidingsConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cached;
mod config;
mod courses;
mod http;
mod jokes;
mod memes;
mod sources;
mod translate;
mod weather;

pub use config::{
    CacheConfig, CourseConfig, DiscordConfig, HttpConfig, HttpConfigBuilder, JokeConfig,
    MemeConfig, TidingsConfig, TranslationConfig, WeatherConfig,
};
pub use courses::{CourseClient, CourseDetails};
pub use http::{HttpFetch, HttpResponse, ReqwestFetcher};
pub use jokes::{Joke, JokeClient};
pub use memes::{Meme, MemeClient, MemeImage};
pub use sources::Sources;
pub use translate::{GoogleTranslator, Translator};
pub use weather::{
    SunTimes, Temperature, WeatherClient, WeatherReport, description, format_timestamp,
    kelvin_to_celsius, observed_at, sun_times, temperature, timezone_hours,
};

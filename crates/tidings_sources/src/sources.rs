//! All API clients, built from one configuration.

use crate::{
    CourseClient, GoogleTranslator, HttpFetch, JokeClient, MemeClient, ReqwestFetcher,
    TidingsConfig, Translator, WeatherClient,
};
use derive_getters::Getters;
use std::sync::Arc;
use tidings_cache::{Clock, FileStore, RecordStore, SystemClock};
use tidings_error::TidingsResult;

/// The clients a command layer needs, sharing one HTTP fetcher, one record
/// store and one clock.
#[derive(Getters)]
pub struct Sources {
    jokes: JokeClient,
    memes: MemeClient,
    courses: CourseClient,
    weather: WeatherClient,
    translator: Arc<dyn Translator>,
    source_language: String,
    target_language: String,
}

impl Sources {
    /// Wire up every client from explicit collaborators.
    pub fn new(
        config: &TidingsConfig,
        http: Arc<dyn HttpFetch>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        tracing::debug!("Building API clients");
        Self {
            jokes: JokeClient::new(config.jokes(), Arc::clone(&http)),
            memes: MemeClient::new(
                config.memes(),
                Arc::clone(&http),
                Arc::clone(&store),
                Arc::clone(&clock),
            ),
            courses: CourseClient::new(
                config.courses(),
                Arc::clone(&http),
                Arc::clone(&store),
                Arc::clone(&clock),
            ),
            weather: WeatherClient::new(config.weather(), Arc::clone(&http), store, clock),
            translator: Arc::new(GoogleTranslator::new(config.translation(), http)),
            source_language: config.translation().source_language().clone(),
            target_language: config.translation().target_language().clone(),
        }
    }

    /// Production wiring: `reqwest`, a file store under the configured cache
    /// directory, and the system clock.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or the cache directory cannot
    /// be created.
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &TidingsConfig) -> TidingsResult<Self> {
        let http = Arc::new(ReqwestFetcher::new(config.http())?);
        let directory = config.cache().resolved_directory();
        tracing::info!(directory = %directory.display(), "Using cache directory");
        let store = Arc::new(FileStore::new(directory)?);
        Ok(Self::new(config, http, store, Arc::new(SystemClock)))
    }

    /// Replace the translator.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources")
            .field("jokes", &self.jokes)
            .field("memes", &self.memes)
            .field("courses", &self.courses)
            .field("weather", &self.weather)
            .field("target_language", &self.target_language)
            .finish_non_exhaustive()
    }
}

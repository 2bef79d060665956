//! Current weather per configured location.

mod adapters;

pub use adapters::{
    SunTimes, Temperature, WeatherReport, description, format_timestamp, kelvin_to_celsius,
    observed_at, sun_times, temperature, timezone_hours,
};

use crate::{HttpFetch, WeatherConfig};
use std::collections::BTreeMap;
use std::sync::Arc;
use tidings_cache::{CacheLookup, Clock, RecordStore, ResourceCache};
use tidings_error::{ConfigError, TidingsResult};

/// Client for the current-weather API.
///
/// Each location alias is cached under its own key (`weather:{alias}`), so
/// refreshing one location never delays another.
pub struct WeatherClient {
    http: Arc<dyn HttpFetch>,
    url: String,
    api_key: Option<String>,
    locations: BTreeMap<String, String>,
    cache: ResourceCache,
}

impl WeatherClient {
    /// Create a client persisting reports in `store`.
    pub fn new(
        config: &WeatherConfig,
        http: Arc<dyn HttpFetch>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        if config.api_key().is_none() {
            tracing::warn!("No weather API key configured, requests will likely be rejected");
        }
        let locations = config
            .locations()
            .iter()
            .map(|(alias, query)| (alias.to_lowercase(), query.clone()))
            .collect();
        Self {
            http,
            url: config.url().clone(),
            api_key: config.api_key().clone(),
            locations,
            cache: ResourceCache::new(store, clock, *config.refresh_secs()),
        }
    }

    /// Configured location aliases, sorted.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// API query for `alias` (case-insensitive), if configured.
    pub fn location_query(&self, alias: &str) -> Option<&str> {
        self.locations.get(&alias.to_lowercase()).map(String::as_str)
    }

    /// Current weather record for a configured location.
    ///
    /// Fetch failures come back as [`CacheLookup::FetchFailed`]; the last good
    /// report stays available through [`WeatherClient::cached`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown alias, and storage errors from the
    /// cache.
    #[tracing::instrument(skip(self))]
    pub async fn current(&self, alias: &str) -> TidingsResult<CacheLookup> {
        let alias = alias.to_lowercase();
        let query = self
            .location_query(&alias)
            .ok_or_else(|| ConfigError::new(format!("Unknown weather location '{}'", alias)))?;

        let mut params = vec![("q", query)];
        if let Some(key) = self.api_key.as_deref() {
            params.push(("appid", key));
        }

        self.cache
            .get(&cache_key(&alias), || async {
                self.http.fetch(&self.url, &params).await?.success_json()
            })
            .await
    }

    /// Last persisted report for `alias`, without fetching.
    pub async fn cached(&self, alias: &str) -> TidingsResult<Option<serde_json::Value>> {
        Ok(self
            .cache
            .peek(&cache_key(&alias.to_lowercase()))
            .await?
            .map(|record| record.into_payload()))
    }
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("url", &self.url)
            .field("has_api_key", &self.api_key.is_some())
            .field("locations", &self.locations)
            .finish_non_exhaustive()
    }
}

fn cache_key(alias: &str) -> String {
    format!("weather:{alias}")
}

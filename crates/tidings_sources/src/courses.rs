//! University course lookup.

use crate::cached::through_cache;
use crate::{CourseConfig, HttpFetch};
use derive_getters::Getters;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tidings_cache::{CatalogEntry, Clock, FallbackResolver, LookupResult, RecordStore, ResourceCache};
use tidings_error::{FetchError, FetchErrorKind, MissingFieldError, TidingsError, TidingsResult};

const CATALOG_KEY: &str = "courses:list";

/// Client for the course catalog API.
///
/// Exact lookups hit `courses/{id}` every time. The full catalog behind the
/// fallback search is cached for `courses.catalog_refresh_secs`.
pub struct CourseClient {
    http: Arc<dyn HttpFetch>,
    base_url: String,
    cache: ResourceCache,
    resolver: FallbackResolver,
}

impl CourseClient {
    /// Create a client persisting the catalog in `store`.
    pub fn new(
        config: &CourseConfig,
        http: Arc<dyn HttpFetch>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut base_url = config.base_url().clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            http,
            base_url,
            cache: ResourceCache::new(store, clock, *config.catalog_refresh_secs()),
            resolver: FallbackResolver::new(),
        }
    }

    /// Exact lookup by course id.
    ///
    /// Any non-success status is a miss. Ids that are not plain alphanumeric
    /// cannot name a course and miss without a request.
    #[tracing::instrument(skip(self))]
    pub async fn course(&self, id: &str) -> Result<Option<JsonValue>, FetchError> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            tracing::debug!("Not a course id, skipping exact lookup");
            return Ok(None);
        }

        let url = format!("{}courses/{}", self.base_url, id);
        let response = self.http.fetch(&url, &[]).await?;
        if !response.is_success() {
            tracing::debug!(status = response.status, "Exact course lookup missed");
            return Ok(None);
        }
        response.json().map(Some)
    }

    /// The full course catalog.
    #[tracing::instrument(skip(self))]
    pub async fn catalog(&self) -> TidingsResult<Vec<CatalogEntry>> {
        let http = Arc::clone(&self.http);
        let url = format!("{}courses/list", self.base_url);
        let payload = through_cache(&self.cache, CATALOG_KEY, || {
            let http = Arc::clone(&http);
            let url = url.clone();
            async move { http.fetch(&url, &[]).await?.success_json() }
        })
        .await?;

        let catalog = serde_json::from_value::<Vec<CatalogEntry>>(payload)
            .map_err(|e| FetchError::new(FetchErrorKind::Decode(e.to_string())))?;
        tracing::debug!(count = catalog.len(), "Loaded course catalog");
        Ok(catalog)
    }

    /// Exact lookup by id, falling back to a search of course names.
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, key: &str) -> TidingsResult<LookupResult> {
        self.resolver
            .resolve(
                key,
                || self.catalog(),
                |id| async move { self.course(&id).await.map_err(TidingsError::from) },
            )
            .await
    }
}

impl std::fmt::Debug for CourseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseClient")
            .field("base_url", &self.base_url)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Display fields of an exactly matched course.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CourseDetails {
    id: String,
    name: String,
    credits: Option<String>,
    description: Option<String>,
}

impl CourseDetails {
    /// Read the course from an exact-lookup payload.
    ///
    /// The course API answers with a one-element array; a bare object is
    /// accepted too.
    pub fn from_record(record: &JsonValue) -> Result<Self, MissingFieldError> {
        let course = match record {
            JsonValue::Array(items) => items.first().ok_or_else(|| MissingFieldError::new("0"))?,
            other => other,
        };

        let text = |field: &str| course.get(field).and_then(scalar_text);
        Ok(Self {
            id: text("course_id").ok_or_else(|| MissingFieldError::new("course_id"))?,
            name: text("name").ok_or_else(|| MissingFieldError::new("name"))?,
            credits: text("credits"),
            description: text("description").filter(|d| !d.trim().is_empty()),
        })
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

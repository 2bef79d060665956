//! Text translation.

use crate::{HttpFetch, TranslationConfig};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tidings_error::{FetchError, FetchErrorKind};

/// Translates short texts between languages. Results are never cached.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target` (ISO 639-1 codes, or
    /// `auto` for the source).
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, FetchError>;
}

/// Translator backed by the public Google Translate endpoint.
#[derive(Clone)]
pub struct GoogleTranslator {
    http: Arc<dyn HttpFetch>,
    url: String,
}

impl GoogleTranslator {
    /// Create a translator.
    pub fn new(config: &TranslationConfig, http: Arc<dyn HttpFetch>) -> Self {
        Self {
            http,
            url: config.url().clone(),
        }
    }
}

impl std::fmt::Debug for GoogleTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslator")
            .field("url", &self.url)
            .finish()
    }
}

#[async_trait::async_trait]
impl Translator for GoogleTranslator {
    #[tracing::instrument(skip(self, text), fields(len = text.len()))]
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, FetchError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let params = [
            ("client", "gtx"),
            ("sl", source),
            ("tl", target),
            ("dt", "t"),
            ("q", text),
        ];
        let body = self.http.fetch(&self.url, &params).await?.success_json()?;
        join_segments(&body)
    }
}

/// The endpoint answers `[[["translated", "original", ...], ...], ...]`, one
/// inner array per sentence.
fn join_segments(body: &JsonValue) -> Result<String, FetchError> {
    let segments = body
        .get(0)
        .and_then(JsonValue::as_array)
        .ok_or_else(|| FetchError::new(FetchErrorKind::Decode("missing translation segments".into())))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(JsonValue::as_str))
        .collect())
}

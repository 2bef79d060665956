//! HTTP fetch collaborator.

use crate::HttpConfig;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tidings_error::{ConfigError, FetchError, FetchErrorKind, TidingsResult};

/// Raw response from an HTTP fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fail with `FetchErrorKind::Status` unless the status is 2xx.
    #[track_caller]
    pub fn into_success(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::status_code(self.status, self.text()))
        }
    }

    /// Body parsed as JSON.
    #[track_caller]
    pub fn json(&self) -> Result<JsonValue, FetchError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| FetchError::new(FetchErrorKind::Decode(e.to_string())))
    }

    /// Body parsed as JSON, after checking for a 2xx status.
    #[track_caller]
    pub fn success_json(self) -> Result<JsonValue, FetchError> {
        self.into_success()?.json()
    }
}

/// Performs GET requests against third-party APIs.
///
/// Implementations report transport problems as `FetchErrorKind::Transport`
/// and return every response that arrived, whatever its status; callers
/// decide what counts as success.
#[async_trait::async_trait]
pub trait HttpFetch: Send + Sync {
    /// GET `url` with `params` appended as a query string.
    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<HttpResponse, FetchError>;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Build a fetcher with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be constructed.
    pub fn new(config: &HttpConfig) -> TidingsResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .user_agent(config.user_agent().as_str())
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpFetch for ReqwestFetcher {
    #[tracing::instrument(skip(self, params), fields(param_count = params.len()))]
    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::new(FetchErrorKind::Transport(e.to_string())))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::new(FetchErrorKind::Transport(e.to_string())))?;

        tracing::debug!(status, size = body.len(), "Received response");
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

//! Mock HTTP fetcher for deterministic testing.

use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tidings_error::{FetchError, FetchErrorKind};
use tidings_sources::{HttpFetch, HttpResponse};

/// One request seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a query parameter.
    #[allow(dead_code)]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Routes URLs to canned responses. Unrouted URLs answer 404.
#[derive(Debug, Default)]
pub struct MockFetcher {
    routes: Mutex<HashMap<String, Result<HttpResponse, FetchError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[allow(dead_code)]
impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with a 200 JSON body.
    pub fn respond_json(&self, url: &str, body: JsonValue) {
        self.respond(url, HttpResponse::new(200, body.to_string()));
    }

    /// Answer `url` with an arbitrary response.
    pub fn respond(&self, url: &str, response: HttpResponse) {
        self.routes.lock().insert(url.to_string(), Ok(response));
    }

    /// Fail requests to `url` at the transport level.
    pub fn fail_transport(&self, url: &str) {
        self.routes.lock().insert(
            url.to_string(),
            Err(FetchError::new(FetchErrorKind::Transport(
                "connection refused".to_string(),
            ))),
        );
    }

    /// Every request so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests made to `url`.
    pub fn call_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.url == url)
            .count()
    }
}

#[async_trait::async_trait]
impl HttpFetch for MockFetcher {
    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            params: params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        });

        self.routes
            .lock()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "not found")))
    }
}

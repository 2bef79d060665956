//! Random jokes.

use crate::{HttpFetch, JokeConfig};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tidings_error::{FetchError, FetchErrorKind, TidingsResult};

/// A two-part joke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Joke {
    /// Identifier assigned by the joke API
    #[serde(default)]
    id: u64,
    /// Category, such as "general" or "programming"
    #[serde(rename = "type", default)]
    kind: String,
    /// Question half
    setup: String,
    /// Answer half
    punchline: String,
}

impl Joke {
    /// Create a joke.
    pub fn new(setup: impl Into<String>, punchline: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind: String::new(),
            setup: setup.into(),
            punchline: punchline.into(),
        }
    }
}

/// Client for the random joke API. Jokes are never cached.
#[derive(Clone)]
pub struct JokeClient {
    http: Arc<dyn HttpFetch>,
    url: String,
}

impl JokeClient {
    /// Create a client.
    pub fn new(config: &JokeConfig, http: Arc<dyn HttpFetch>) -> Self {
        Self {
            http,
            url: config.url().clone(),
        }
    }

    /// Fetch one random joke.
    #[tracing::instrument(skip(self))]
    pub async fn random(&self) -> TidingsResult<Joke> {
        let body = self.http.fetch(&self.url, &[]).await?.success_json()?;
        let joke = serde_json::from_value::<Joke>(body)
            .map_err(|e| FetchError::new(FetchErrorKind::Decode(e.to_string())))?;
        tracing::debug!(id = joke.id, kind = %joke.kind, "Fetched joke");
        Ok(joke)
    }
}

impl std::fmt::Debug for JokeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JokeClient").field("url", &self.url).finish()
    }
}

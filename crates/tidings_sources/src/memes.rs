//! Meme templates.

use crate::cached::through_cache;
use crate::{HttpFetch, MemeConfig};
use derive_getters::Getters;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tidings_cache::{CatalogItem, Clock, RecordStore, ResourceCache, search};
use tidings_error::{FetchError, FetchErrorKind, MissingFieldError, TidingsResult};

const TEMPLATES_KEY: &str = "memes:templates";

/// A meme template as listed by the meme API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Meme {
    id: String,
    name: String,
    url: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

impl Meme {
    /// Create a template entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            width: 0,
            height: 0,
        }
    }
}

impl CatalogItem for Meme {
    fn label(&self) -> &str {
        &self.name
    }
}

/// Downloaded template image.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MemeImage {
    filename: String,
    bytes: Vec<u8>,
}

/// Client for the meme template API.
///
/// The template list changes rarely and is cached for
/// `memes.refresh_secs`; image downloads are not cached.
pub struct MemeClient {
    http: Arc<dyn HttpFetch>,
    url: String,
    cache: ResourceCache,
}

impl MemeClient {
    /// Create a client persisting the template list in `store`.
    pub fn new(
        config: &MemeConfig,
        http: Arc<dyn HttpFetch>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http,
            url: config.url().clone(),
            cache: ResourceCache::new(store, clock, *config.refresh_secs()),
        }
    }

    /// All known templates, from the cache when it is fresh enough.
    #[tracing::instrument(skip(self))]
    pub async fn templates(&self) -> TidingsResult<Vec<Meme>> {
        let http = Arc::clone(&self.http);
        let url = self.url.clone();
        let payload = through_cache(&self.cache, TEMPLATES_KEY, || {
            let http = Arc::clone(&http);
            let url = url.clone();
            async move { http.fetch(&url, &[]).await?.success_json() }
        })
        .await?;

        let list = payload
            .pointer("/data/memes")
            .cloned()
            .ok_or_else(|| MissingFieldError::new("data.memes"))?;
        let memes = serde_json::from_value::<Vec<Meme>>(list)
            .map_err(|e| FetchError::new(FetchErrorKind::Decode(e.to_string())))?;
        tracing::debug!(count = memes.len(), "Loaded meme templates");
        Ok(memes)
    }

    /// A uniformly random template, or `None` when the list is empty.
    pub async fn random(&self) -> TidingsResult<Option<Meme>> {
        let memes = self.templates().await?;
        Ok(memes.choose(&mut rand::thread_rng()).cloned())
    }

    /// A random template among those whose name contains `name`.
    pub async fn random_matching(&self, name: &str) -> TidingsResult<Option<Meme>> {
        let memes = self.templates().await?;
        let matches = search(name, &memes);
        Ok(matches.choose(&mut rand::thread_rng()).cloned())
    }

    /// Download the template image.
    #[tracing::instrument(skip(self, meme), fields(id = %meme.id))]
    pub async fn download(&self, meme: &Meme) -> TidingsResult<MemeImage> {
        let response = self.http.fetch(&meme.url, &[]).await?.into_success()?;
        tracing::debug!(size = response.body.len(), "Downloaded meme image");
        Ok(MemeImage {
            filename: image_filename(&meme.url),
            bytes: response.body,
        })
    }
}

impl std::fmt::Debug for MemeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemeClient")
            .field("url", &self.url)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// `meme.<ext>`, taking the extension from the image URL (png by default).
fn image_filename(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    let ext = match last.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => "png".to_string(),
    };
    format!("meme.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_filename_uses_url_extension() {
        assert_eq!(image_filename("https://i.imgflip.com/30b1gx.jpg"), "meme.jpg");
        assert_eq!(image_filename("https://i.imgflip.com/1bij.PNG?x=1"), "meme.png");
        assert_eq!(image_filename("https://i.imgflip.com/noext"), "meme.png");
    }
}

//! Cache access for resources that must always produce a value.

use serde_json::Value as JsonValue;
use std::future::Future;
use tidings_cache::{CacheLookup, ResourceCache};
use tidings_error::{FetchError, TidingsResult};

/// Read `key` through `cache`, always ending with a payload or an error.
///
/// A failed refresh falls back to the stale record when one exists. When the
/// key is stamped but nothing was ever stored, the resource is fetched
/// directly without caching.
pub(crate) async fn through_cache<F, Fut>(
    cache: &ResourceCache,
    key: &str,
    fetch: F,
) -> TidingsResult<JsonValue>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<JsonValue, FetchError>>,
{
    match cache.get(key, &fetch).await? {
        CacheLookup::Fresh(payload) | CacheLookup::Cached(payload) => Ok(payload),
        CacheLookup::FetchFailed(e) => match cache.peek(key).await? {
            Some(stale) => {
                tracing::warn!(key, error = %e, "Refresh failed, serving stale record");
                Ok(stale.into_payload())
            }
            None => Err(e.into()),
        },
        CacheLookup::NotAvailable => {
            tracing::warn!(key, "Nothing cached yet, fetching directly");
            Ok(fetch().await?)
        }
    }
}

//! Remote resource cache gated by a refresh interval.

use crate::{Clock, ClockGate, RecordStore, RefreshInterval, Timestamp};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tidings_error::{FetchError, StorageError, StorageErrorKind, TidingsResult};

const RECORD_PREFIX: &str = "record:";

/// Persisted payload with the time it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct CacheRecord {
    stored_time: Timestamp,
    payload: JsonValue,
}

impl CacheRecord {
    /// Create a record.
    pub fn new(stored_time: Timestamp, payload: JsonValue) -> Self {
        Self {
            stored_time,
            payload,
        }
    }

    /// Consume the record, keeping the payload.
    pub fn into_payload(self) -> JsonValue {
        self.payload
    }
}

/// Outcome of [`ResourceCache::get`].
#[derive(Debug, Clone)]
pub enum CacheLookup {
    /// Fetched during this call and persisted.
    Fresh(JsonValue),
    /// Not due; served from the persisted record.
    Cached(JsonValue),
    /// Not due, and nothing has ever been stored.
    NotAvailable,
    /// Due, but the fetch failed. The previous record is untouched.
    FetchFailed(FetchError),
}

impl CacheLookup {
    /// Payload, when one is available.
    pub fn payload(&self) -> Option<&JsonValue> {
        match self {
            Self::Fresh(payload) | Self::Cached(payload) => Some(payload),
            Self::NotAvailable | Self::FetchFailed(_) => None,
        }
    }

    /// Convert into a result: payload if any, `None` for `NotAvailable`, the
    /// fetch error otherwise.
    pub fn into_result(self) -> Result<Option<JsonValue>, FetchError> {
        match self {
            Self::Fresh(payload) | Self::Cached(payload) => Ok(Some(payload)),
            Self::NotAvailable => Ok(None),
            Self::FetchFailed(e) => Err(e),
        }
    }
}

/// Cache that refetches a keyed resource at most once per interval.
///
/// When the [`ClockGate`] says a key is due, the fetch runs. On success the
/// payload is persisted and the gate is stamped; on failure nothing is
/// written, so the previous payload keeps being served until a later fetch
/// succeeds. When the key is not due the persisted payload is returned
/// without fetching.
///
/// Calls for the same key are serialized, so two concurrent callers can
/// never both fetch within one interval.
pub struct ResourceCache {
    gate: ClockGate,
    store: Arc<dyn RecordStore>,
    locks: parking_lot::Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ResourceCache {
    /// Create a cache persisting records and clock stamps in `store`.
    pub fn new(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        interval: RefreshInterval,
    ) -> Self {
        tracing::debug!(interval = interval.as_secs(), "Creating new ResourceCache");
        Self {
            gate: ClockGate::new(Arc::clone(&store), clock, interval),
            store,
            locks: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// The gate deciding when keys are due.
    pub fn gate(&self) -> &ClockGate {
        &self.gate
    }

    /// Get the payload for `key`, fetching only when a refresh is due.
    ///
    /// # Errors
    ///
    /// Fetch failures are reported as [`CacheLookup::FetchFailed`], not as
    /// errors. An error is returned only when a successfully fetched payload
    /// cannot be persisted, or when the store fails for a reason other than
    /// a corrupt record.
    #[tracing::instrument(skip(self, fetch), fields(interval = self.gate.interval().as_secs()))]
    pub async fn get<F, Fut>(&self, key: &str, fetch: F) -> TidingsResult<CacheLookup>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<JsonValue, FetchError>>,
    {
        let lock = self.key_lock(key);
        let _guard = lock.lock().await;

        let now = self.gate.now();
        if !self.gate.is_due_at(key, now).await {
            return Ok(match self.peek(key).await? {
                Some(record) => {
                    tracing::debug!(stored_time = record.stored_time, "Cache hit");
                    CacheLookup::Cached(record.into_payload())
                }
                None => {
                    tracing::debug!("Not due and nothing stored");
                    CacheLookup::NotAvailable
                }
            });
        }

        let payload = match fetch().await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(
                    status = ?e.status(),
                    error = %e,
                    "Fetch failed, keeping previous record"
                );
                return Ok(CacheLookup::FetchFailed(e));
            }
        };

        let stored_time = match self.peek(key).await {
            Ok(Some(previous)) => previous.stored_time.max(now),
            _ => now,
        };
        let record = CacheRecord::new(stored_time, payload);
        let encoded = serde_json::to_value(&record)
            .map_err(|e| StorageError::new(StorageErrorKind::Encode(e.to_string())))?;
        self.store.put(&record_key(key), &encoded).await?;
        self.gate.mark_refreshed(key, now).await?;

        tracing::info!(stored_time, "Refreshed cached resource");
        Ok(CacheLookup::Fresh(record.into_payload()))
    }

    /// Read the persisted record for `key` without fetching.
    ///
    /// A record that no longer decodes is reported as absent.
    pub async fn peek(&self, key: &str) -> TidingsResult<Option<CacheRecord>> {
        let value = match self.store.get(&record_key(key)).await {
            Ok(value) => value,
            Err(e) if is_corrupt(&e) => {
                tracing::warn!(key, error = %e, "Corrupt cache record, treating as absent");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(value.and_then(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key, error = %e, "Malformed cache record, treating as absent");
                None
            }
        }))
    }

    fn key_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(self.locks.lock().entry(key.to_string()).or_default())
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

fn record_key(key: &str) -> String {
    format!("{RECORD_PREFIX}{key}")
}

fn is_corrupt(err: &tidings_error::TidingsError) -> bool {
    matches!(
        err.kind(),
        tidings_error::TidingsErrorKind::Storage(StorageError {
            kind: StorageErrorKind::Corrupt(_),
            ..
        })
    )
}

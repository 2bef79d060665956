//! Key-value persistence for cached records.

use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tidings_error::TidingsResult;

/// Pluggable persistence for cache records and clock stamps.
///
/// A store must keep "no record" (`Ok(None)`) distinct from "record whose
/// value is JSON `null`" (`Ok(Some(JsonValue::Null))`).
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageErrorKind::Corrupt` when bytes exist but do not decode,
    /// and other storage errors when the backend cannot be read.
    async fn get(&self, key: &str) -> TidingsResult<Option<JsonValue>>;

    /// Replace the value stored under `key`.
    async fn put(&self, key: &str, value: &JsonValue) -> TidingsResult<()>;
}

/// Volatile store backed by a hash map.
///
/// Useful for tests and for deployments that do not need the cache to
/// survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, JsonValue>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, key: &str) -> TidingsResult<Option<JsonValue>> {
        Ok(self.records.read().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &JsonValue) -> TidingsResult<()> {
        self.records.write().insert(key.to_string(), value.clone());
        Ok(())
    }
}

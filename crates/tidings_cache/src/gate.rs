//! Interval gate backed by a persisted "last refreshed" stamp.

use crate::{Clock, RecordStore, RefreshInterval, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tidings_error::TidingsResult;

const STAMP_PREFIX: &str = "clock:";

/// Persisted form of a gate's last refresh time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockStamp {
    /// Unix seconds of the last successful refresh
    pub stored_time: Timestamp,
}

/// Decides whether a keyed resource is due for a refresh.
///
/// A key is due when it has no stamp, or when at least one interval has
/// elapsed since its stamp. Deciding never writes: callers record a refresh
/// with [`ClockGate::mark_refreshed`] only after the refresh succeeded.
///
/// An unreadable or malformed stamp counts as "no stamp", so a damaged store
/// always errs toward refreshing.
pub struct ClockGate {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    interval: RefreshInterval,
}

impl ClockGate {
    /// Create a gate that persists stamps in `store`.
    pub fn new(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        interval: RefreshInterval,
    ) -> Self {
        Self {
            store,
            clock,
            interval,
        }
    }

    /// The configured refresh interval.
    pub fn interval(&self) -> RefreshInterval {
        self.interval
    }

    /// Current time according to the gate's clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Whether `key` is due for a refresh right now.
    pub async fn is_due(&self, key: &str) -> bool {
        self.is_due_at(key, self.clock.now()).await
    }

    /// Whether `key` is due for a refresh at `now`.
    #[tracing::instrument(skip(self), fields(interval = self.interval.as_secs()))]
    pub async fn is_due_at(&self, key: &str, now: Timestamp) -> bool {
        let due = match self.last_refreshed(key).await {
            None => true,
            Some(stored_time) => {
                let interval = i64::try_from(self.interval.as_secs()).unwrap_or(i64::MAX);
                now.saturating_sub(stored_time) >= interval
            }
        };
        tracing::trace!(due, "Checked refresh gate");
        due
    }

    /// Time of the last recorded refresh, if a readable stamp exists.
    pub async fn last_refreshed(&self, key: &str) -> Option<Timestamp> {
        let stamp_key = stamp_key(key);
        match self.store.get(&stamp_key).await {
            Ok(Some(value)) => match serde_json::from_value::<ClockStamp>(value) {
                Ok(stamp) => Some(stamp.stored_time),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Malformed clock stamp, treating as absent");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Unreadable clock stamp, treating as absent");
                None
            }
        }
    }

    /// Record a successful refresh of `key` at `now`.
    ///
    /// The stamp never moves backwards: if a later stamp is already stored it
    /// is kept.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the stamp cannot be written.
    #[tracing::instrument(skip(self))]
    pub async fn mark_refreshed(&self, key: &str, now: Timestamp) -> TidingsResult<()> {
        let stored_time = match self.last_refreshed(key).await {
            Some(previous) if previous > now => {
                tracing::debug!(previous, "Keeping newer stamp");
                previous
            }
            _ => now,
        };

        let stamp = serde_json::json!({ "stored_time": stored_time });
        self.store.put(&stamp_key(key), &stamp).await?;
        tracing::debug!(stored_time, "Marked refreshed");
        Ok(())
    }
}

impl std::fmt::Debug for ClockGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockGate")
            .field("clock", &self.clock)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

fn stamp_key(key: &str) -> String {
    format!("{STAMP_PREFIX}{key}")
}

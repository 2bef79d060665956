//! Time-gated remote resource caching and fallback lookup.
//!
//! This crate holds the stateful core of Tidings:
//!
//! - [`ClockGate`] decides from a persisted timestamp whether a refresh is due.
//! - [`ResourceCache`] wraps a remote fetch, refreshing only when the gate says
//!   so and serving the last persisted payload otherwise.
//! - [`FallbackResolver`] tries an exact lookup and falls back to a
//!   case-insensitive substring search over a reference catalog.
//!
//! Persistence goes through the [`RecordStore`] trait, with a filesystem
//! backend ([`FileStore`]) and an in-memory one ([`MemoryStore`]).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use tidings_cache::{CacheLookup, MemoryStore, RefreshInterval, ResourceCache, SystemClock};
//! use tidings_error::FetchError;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = ResourceCache::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(SystemClock),
//!     RefreshInterval::from_secs(60)?,
//! );
//!
//! let lookup = cache
//!     .get("weather:germantown", || async { Ok::<_, FetchError>(json!({"dt": 1})) })
//!     .await?;
//! assert!(matches!(lookup, CacheLookup::Fresh(_)));
//!
//! // Within the interval the persisted payload is served without fetching.
//! let lookup = cache
//!     .get("weather:germantown", || async { Ok::<_, FetchError>(json!({"dt": 2})) })
//!     .await?;
//! assert_eq!(lookup.payload(), Some(&json!({"dt": 1})));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod clock;
mod filesystem;
mod gate;
mod interval;
mod resolver;
mod store;

pub use cache::{CacheLookup, CacheRecord, ResourceCache};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use filesystem::FileStore;
pub use gate::{ClockGate, ClockStamp};
pub use interval::RefreshInterval;
pub use resolver::{CatalogEntry, CatalogItem, FallbackResolver, LookupResult, search};
pub use store::{MemoryStore, RecordStore};

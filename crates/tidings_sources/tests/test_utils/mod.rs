//! Test utilities for tidings_sources tests.
//!
//! Provides an in-memory `HttpFetch` so no test touches the network.

pub mod mock_http;

#[allow(unused_imports)]
pub use mock_http::{MockFetcher, RecordedRequest};

use std::sync::Arc;
use tidings_cache::{ManualClock, MemoryStore};
use tidings_sources::{Sources, TidingsConfig};

/// Sources wired to a mock fetcher, an in-memory store and a manual clock
/// starting at `start`.
#[allow(dead_code)]
pub fn mock_sources(
    config: &TidingsConfig,
    start: i64,
) -> (Sources, Arc<MockFetcher>, ManualClock) {
    let http = Arc::new(MockFetcher::new());
    let clock = ManualClock::new(start);
    let sources = Sources::new(
        config,
        http.clone(),
        Arc::new(MemoryStore::new()),
        Arc::new(clock.clone()),
    );
    (sources, http, clock)
}

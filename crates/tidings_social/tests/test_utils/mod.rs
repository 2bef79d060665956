//! Test utilities for tidings_social tests.

pub mod mock_http;

#[allow(unused_imports)]
pub use mock_http::{MockFetcher, RecordedRequest};

use std::sync::Arc;
use tidings_cache::{ManualClock, MemoryStore};
use tidings_social::TidingsCommands;
use tidings_sources::{Sources, TidingsConfig};

/// Command set wired to a mock fetcher, an in-memory store and a manual clock.
pub fn mock_commands(
    config: &TidingsConfig,
    start: i64,
) -> (TidingsCommands, Arc<MockFetcher>, ManualClock) {
    let http = Arc::new(MockFetcher::new());
    let clock = ManualClock::new(start);
    let sources = Sources::new(
        config,
        http.clone(),
        Arc::new(MemoryStore::new()),
        Arc::new(clock.clone()),
    );
    let commands = TidingsCommands::new(
        Arc::new(sources),
        config.discord().command_prefix().clone(),
        *config.courses().max_suggestions(),
    );
    (commands, http, clock)
}

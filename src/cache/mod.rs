//! Cache Module
//!
//! Provides an in-memory response cache with time-based expiration.

mod contract;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use contract::ResponseCache;
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

pub(crate) use store::Shared;

// == Public Constants ==
/// Shortest sweep period the reaper will run with
pub const MIN_REAP_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1);

/// Longest sweep period the reaper will run with (30 days)
pub const MAX_REAP_INTERVAL: std::time::Duration =
    std::time::Duration::from_secs(30 * 24 * 60 * 60);

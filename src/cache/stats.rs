//! Cache Statistics Module
//!
//! Tracks hits, misses and how expired entries were removed.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing cache activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that returned a fresh value
    pub hits: u64,
    /// Number of lookups that found nothing usable (absent or expired)
    pub misses: u64,
    /// Expired entries removed by `get` or `contains_key`.
    ///
    /// Only the `get` removals are also counted in `misses`, so this can
    /// exceed `misses` when `contains_key` drops entries.
    pub expired_on_read: u64,
    /// Expired entries removed by reaper sweeps
    pub reaped: u64,
    /// Entries physically present when the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expired Read ==
    /// Counts a lookup that found an expired entry and dropped it.
    pub fn record_expired_read(&mut self) {
        self.misses += 1;
        self.expired_on_read += 1;
    }

    // == Record Expired Drop ==
    /// Counts an expired entry dropped by a key check rather than a lookup.
    ///
    /// Not a miss: no value was requested.
    pub fn record_expired_drop(&mut self) {
        self.expired_on_read += 1;
    }

    // == Record Reaped ==
    /// Adds the number of entries removed by one reaper sweep.
    pub fn record_reaped(&mut self, count: usize) {
        self.reaped += count as u64;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

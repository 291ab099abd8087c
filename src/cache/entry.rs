//! Cache Entry Module
//!
//! Defines a stored response body together with its creation time.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored value plus the instant it was added.
///
/// Uses Tokio's clock so paused-time tests can drive expiration.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The raw response body
    pub value: Vec<u8>,
    /// When the entry was added
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    /// Time elapsed since the entry was added.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// fresh. It expires only once its age is strictly greater.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}

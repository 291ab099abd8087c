//! The Get/Add contract callers depend on.

use std::sync::Arc;

/// Narrow interface between fetch code and whatever cache backs it.
///
/// Collaborators take this trait rather than a concrete cache so tests and
/// alternative stores can be injected.
pub trait ResponseCache: Send + Sync {
    /// Returns the stored body for `key` if it is present and fresh.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn add(&self, key: String, value: Vec<u8>);
}

impl<T: ResponseCache + ?Sized> ResponseCache for Arc<T> {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn add(&self, key: String, value: Vec<u8>) {
        (**self).add(key, value)
    }
}

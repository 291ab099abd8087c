//! Error types for the response cache
//!
//! The cache itself never fails; these cover configuration and the
//! cache-aside fetch helper.

use thiserror::Error;

// == Fetch Error Enum ==
/// Failure of a cache-aside lookup.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The caller-supplied fetch future failed
    #[error("Upstream fetch failed: {0}")]
    Upstream(#[source] anyhow::Error),

    /// The fetched body was not valid JSON for the requested type
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

// == Config Error Enum ==
/// Rejected configuration values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// TTL must be a positive duration
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache-aside lookups.
pub type Result<T> = std::result::Result<T, FetchError>;

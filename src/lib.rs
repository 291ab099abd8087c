//! Resp Cache - A time-bounded in-process response cache
//!
//! Stores raw response bodies keyed by request URL, serves them back only
//! while fresh, and sweeps stale entries from a background task.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
mod tasks;

pub use cache::{CacheStats, ResponseCache, TtlCache};
pub use config::CacheConfig;
pub use error::{ConfigError, FetchError};
pub use fetch::get_or_fetch;

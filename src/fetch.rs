//! Cache-aside lookup
//!
//! Helper for code that fetches JSON documents by URL: consult the cache,
//! fall back to the caller's fetch, and cache only bodies that decode.

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::error::{FetchError, Result};

/// Returns the document stored under `key`, fetching it on a miss.
///
/// On a hit the cached bytes are decoded as JSON into `T`. Cached bytes that
/// no longer decode are treated as a miss. On a miss `fetch` is awaited for
/// the raw body, which is decoded and only then stored under `key`. The
/// cache lock is never held while `fetch` runs.
///
/// # Errors
/// - [`FetchError::Upstream`] if `fetch` fails
/// - [`FetchError::Decode`] if the fetched body is not a valid `T`
pub async fn get_or_fetch<T, C, F, Fut>(cache: &C, key: &str, fetch: F) -> Result<T>
where
    T: DeserializeOwned,
    C: ResponseCache + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<u8>>>,
{
    if let Some(body) = cache.get(key) {
        match serde_json::from_slice(&body) {
            Ok(value) => {
                debug!(key, "Cache hit");
                return Ok(value);
            }
            Err(err) => warn!(key, error = %err, "Cached body failed to decode, refetching"),
        }
    }

    let body = fetch().await.map_err(FetchError::Upstream)?;
    let value = serde_json::from_slice(&body)?;
    cache.add(key.to_string(), body);
    debug!(key, "Cached fresh response");

    Ok(value)
}

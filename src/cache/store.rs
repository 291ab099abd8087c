//! Cache Store Module
//!
//! Main cache engine: a mutex-guarded HashMap with lazy expiration on read
//! and a background reaper for entries nobody reads again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{
    CacheEntry, CacheStats, ResponseCache, MAX_REAP_INTERVAL, MIN_REAP_INTERVAL,
};
use crate::config::CacheConfig;
use crate::tasks::spawn_reaper;

/// Map and counters, guarded together so a lookup and its stats update are
/// one critical section.
#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

/// State shared between a [`TtlCache`] and its reaper task.
#[derive(Debug)]
pub(crate) struct Shared {
    state: Mutex<State>,
    ttl: Duration,
}

impl Shared {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            state: Mutex::new(State::default()),
            ttl,
        }
    }

    // No code panics while holding the lock, so a poisoned map is still consistent
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Purge Expired ==
    /// Removes every entry older than the TTL and returns how many went.
    pub(crate) fn purge_expired(&self) -> usize {
        let mut state = self.lock();
        let before = state.entries.len();
        let ttl = self.ttl;
        state.entries.retain(|_, entry| !entry.is_expired(ttl));

        let removed = before - state.entries.len();
        state.stats.record_reaped(removed);
        removed
    }
}

// == TTL Cache ==
/// Response cache whose entries expire a fixed time after they are added.
///
/// Construct one explicitly and hand it (usually behind an `Arc`) to the code
/// that needs it. Creating a cache spawns its reaper, so [`TtlCache::new`]
/// must be called from within a Tokio runtime. The reaper stops on
/// [`TtlCache::shutdown`] or when the cache is dropped.
#[derive(Debug)]
pub struct TtlCache {
    shared: Arc<Shared>,
    shutdown_tx: watch::Sender<bool>,
    reaper: JoinHandle<()>,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache that sweeps once per `ttl`.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        Self::with_reap_interval(ttl, ttl)
    }

    /// Creates an empty cache with a sweep period independent of the TTL.
    ///
    /// `reap_interval` is clamped to [`MIN_REAP_INTERVAL`]..=[`MAX_REAP_INTERVAL`],
    /// so a zero period or `Duration::MAX` ("never expire") are both accepted.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn with_reap_interval(ttl: Duration, reap_interval: Duration) -> Self {
        let shared = Arc::new(Shared::new(ttl));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let interval = reap_interval.clamp(MIN_REAP_INTERVAL, MAX_REAP_INTERVAL);
        let reaper = spawn_reaper(Arc::downgrade(&shared), interval, shutdown_rx);

        info!(?ttl, ?interval, "Response cache created");

        Self {
            shared,
            shutdown_tx,
            reaper,
        }
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_reap_interval(config.ttl(), config.reap_interval())
    }

    // == Add ==
    /// Stores `value` under `key`, stamped with the current time.
    ///
    /// Overwrites any existing entry and restarts its TTL.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let entry = CacheEntry::new(value.into());
        self.shared.lock().entries.insert(key.into(), entry);
    }

    // == Get ==
    /// Returns a copy of the stored value if present and not expired.
    ///
    /// An expired entry is removed in the same critical section as the check.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let ttl = self.shared.ttl;
        let mut state = self.shared.lock();

        let expired = match state.entries.get(key) {
            None => {
                state.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(ttl),
        };

        if expired {
            state.entries.remove(key);
            state.stats.record_expired_read();
            debug!(key, "Dropped expired entry on read");
            return None;
        }

        state.stats.record_hit();
        state.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Contains Key ==
    /// Checks for a fresh entry without copying its value.
    ///
    /// Removes the entry if it has expired. Not a lookup, so hit/miss counters
    /// are left alone; only `expired_on_read` moves.
    pub fn contains_key(&self, key: &str) -> bool {
        let ttl = self.shared.ttl;
        let mut state = self.shared.lock();

        match state.entries.get(key).map(|entry| entry.is_expired(ttl)) {
            Some(false) => true,
            Some(true) => {
                state.entries.remove(key);
                state.stats.record_expired_drop();
                false
            }
            None => false,
        }
    }

    // == Purge Expired ==
    /// Runs one sweep immediately. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.shared.purge_expired()
    }

    // == Length ==
    /// Number of entries physically held, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.shared.lock().entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are held, fresh or expired.
    pub fn is_empty(&self) -> bool {
        self.shared.lock().entries.is_empty()
    }

    // == TTL ==
    /// Returns the expiration window fixed at construction.
    pub fn ttl(&self) -> Duration {
        self.shared.ttl
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let state = self.shared.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }

    // == Shutdown ==
    /// Stops the background reaper. Safe to call more than once.
    ///
    /// The cache keeps serving `get`/`add` afterwards; expired entries are then
    /// only removed lazily or through [`TtlCache::purge_expired`].
    pub fn shutdown(&self) {
        let was_stopped = self.shutdown_tx.send_replace(true);
        if !was_stopped {
            debug!("Reaper shutdown requested");
        }
    }

    /// True until the reaper task has exited.
    pub fn is_reaper_running(&self) -> bool {
        !self.reaper.is_finished()
    }
}

impl Drop for TtlCache {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl ResponseCache for TtlCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        TtlCache::get(self, key)
    }

    fn add(&self, key: String, value: Vec<u8>) {
        TtlCache::add(self, key, value)
    }
}

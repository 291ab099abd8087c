//! Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{Shared, MAX_REAP_INTERVAL};

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The task holds only a weak reference to the cache state and exits when
/// either the shutdown channel fires (or its sender is dropped) or the
/// cache state is gone. The lock is taken per sweep and never held across
/// an await point.
///
/// # Arguments
/// * `shared` - Weak reference to the cache state
/// * `interval` - Time between sweeps, capped at [`MAX_REAP_INTERVAL`]; the
///   first sweep happens one interval in
/// * `shutdown` - Receiver that is flipped to `true` on shutdown
pub(crate) fn spawn_reaper(
    shared: Weak<Shared>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?interval, "Starting cache reaper");

        let interval = interval.min(MAX_REAP_INTERVAL);
        let start = Instant::now()
            .checked_add(interval)
            .unwrap_or_else(Instant::now);
        let mut ticker = time::interval_at(start, interval);
        // A stalled runtime should not trigger a burst of catch-up sweeps
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                // Either a shutdown signal or the sender being dropped
                _ = shutdown.changed() => break,
            }

            // Cache already dropped
            let Some(state) = shared.upgrade() else {
                break;
            };
            let removed = state.purge_expired();
            drop(state);

            if removed > 0 {
                info!("Cache reaper: removed {} expired entries", removed);
            } else {
                debug!("Cache reaper: no expired entries found");
            }
        }

        info!("Cache reaper stopped");
    })
}

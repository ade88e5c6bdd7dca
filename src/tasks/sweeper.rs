//! TTL Sweeper Task
//!
//! Background task that periodically removes idle cache entries, so keys
//! nobody reads again do not hold capacity slots forever.

use std::hash::Hash;
use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

// == Sweeper Handle ==
/// Handle to a running sweep loop.
///
/// Dropping the handle closes the shutdown channel, which also stops the
/// loop. Use [`Sweeper::stop`] to wait for it to finish.
#[derive(Debug)]
pub struct Sweeper {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Signals the loop to exit and waits for it.
    ///
    /// An in-flight sweep pass is allowed to complete.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.handle.await {
            warn!("TTL sweeper terminated abnormally: {}", e);
        }
    }

    /// Returns true once the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The task only holds a weak reference to the store: it exits on its own
/// once the last owner of the store is gone, or when the returned
/// [`Sweeper`] is stopped or dropped. The first pass runs one interval
/// after spawning.
///
/// # Panics
/// Panics if called outside of a Tokio runtime.
pub fn spawn_sweeper<K, V>(store: Weak<Mutex<CacheStore<K, V>>>, interval: Duration) -> Sweeper
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
    let interval = interval.max(Duration::from_millis(1));

    let handle = tokio::spawn(async move {
        info!(
            "Starting TTL sweeper with interval of {} ms",
            interval.as_millis()
        );

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(shared) = store.upgrade() else {
                        debug!("Cache dropped, TTL sweeper exiting");
                        break;
                    };

                    let (removed, remaining) = {
                        let mut guard = shared.lock();
                        let removed = guard.sweep_expired();
                        (removed, guard.len())
                    };

                    if removed > 0 {
                        info!(
                            "TTL sweep: removed {} expired entries, {} remaining",
                            removed, remaining
                        );
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
                _ = &mut shutdown_rx => {
                    debug!("TTL sweeper received shutdown signal");
                    break;
                }
            }
        }
    });

    Sweeper {
        shutdown_tx,
        handle,
    }
}

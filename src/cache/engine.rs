//! Cache Engine Module
//!
//! Thread-safe handle over a [`CacheStore`] plus its background sweeper.
//! Every operation runs under one exclusive lock, so operations are
//! linearizable in lock acquisition order.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore, DEFAULT_SWEEP_INTERVAL};
use crate::tasks::{spawn_sweeper, Sweeper};

// == Cache ==
/// Shared, capacity-bounded LRU cache with sliding TTL expiration.
///
/// Clones share the same entries. The background sweeper stops when
/// [`Cache::shutdown`] is awaited or when the last clone is dropped.
#[derive(Debug)]
pub struct Cache<K, V> {
    store: Arc<Mutex<CacheStore<K, V>>>,
    sweeper: Arc<Mutex<Option<Sweeper>>>,
    ttl: Duration,
    sweep_interval: Duration,
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            sweeper: Arc::clone(&self.sweeper),
            ttl: self.ttl,
            sweep_interval: self.sweep_interval,
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates a cache and starts sweeping it every [`DEFAULT_SWEEP_INTERVAL`].
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_sweep_interval(capacity, ttl, DEFAULT_SWEEP_INTERVAL)
    }

    /// Creates a cache whose sweeper runs every `sweep_interval`.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn with_sweep_interval(capacity: usize, ttl: Duration, sweep_interval: Duration) -> Self {
        let store = Arc::new(Mutex::new(CacheStore::new(capacity, ttl)));
        let sweeper = spawn_sweeper(Arc::downgrade(&store), sweep_interval);

        Self {
            store,
            sweeper: Arc::new(Mutex::new(Some(sweeper))),
            ttl,
            sweep_interval,
        }
    }

    // == Get ==
    /// Returns the value for `key`, or None on a miss or an expired entry.
    ///
    /// A hit refreshes both recency and the idle timer.
    pub fn get(&self, key: &K) -> Option<V> {
        self.store.lock().get(key)
    }

    // == Set ==
    /// Stores `value` under `key`, evicting the least recently used entry
    /// when a new key arrives at full capacity.
    pub fn set(&self, key: K, value: V) {
        let evicted = self.store.lock().set(key, value);
        if evicted.is_some() {
            debug!("Evicted least recently used entry to admit a new key");
        }
    }

    // == Evict ==
    /// Removes `key` if present. Returns false if it was absent.
    pub fn evict(&self, key: &K) -> bool {
        self.store.lock().evict(key)
    }

    // == Sweep ==
    /// Runs one sweep pass immediately and returns the number removed.
    pub fn sweep(&self) -> usize {
        self.store.lock().sweep_expired()
    }

    // == Shutdown ==
    /// Stops the background sweeper and waits for it to exit.
    ///
    /// The cache stays usable afterwards; only proactive expiry stops.
    /// Calling this more than once is a no-op.
    pub async fn shutdown(&self) {
        let sweeper = self.sweeper.lock().take();
        if let Some(sweeper) = sweeper {
            sweeper.stop().await;
            warn!("TTL sweeper stopped");
        }
    }

    /// Returns true while the background sweeper is alive.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|sweeper| !sweeper.is_finished())
    }

    // == Accessors ==
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    /// Configured idle timeout.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    /// Returns keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.store.lock().keys_by_recency()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.store.lock().assert_consistent();
    }
}

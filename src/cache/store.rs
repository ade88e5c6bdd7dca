//! Cache Store Module
//!
//! Single-threaded cache engine combining a HashMap index with the
//! recency list. Capacity pressure evicts from the tail, idle entries
//! expire lazily on read and eagerly through `sweep_expired`.
//!
//! The `*_at` variants take the current instant explicitly; the plain
//! variants read the monotonic clock.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::cache::entry::{Entry, SlotId};
use crate::cache::{CacheStats, RecencyList};

// == Cache Store ==
/// Capacity-bounded LRU map with a sliding idle TTL.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to slot lookup
    index: HashMap<K, SlotId>,
    /// Entries ordered from most to least recently used
    order: RecencyList<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of live entries
    capacity: usize,
    /// Maximum idle time before an entry expires
    ttl: Duration,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of live entries, clamped to at least 1
    /// * `ttl` - Idle time after which an entry is expired
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
            ttl,
        }
    }

    // == Get ==
    /// Returns the value for `key` if present and not expired.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Like [`get`](Self::get) with an explicit current instant.
    ///
    /// Staleness is judged against the timestamp from before this read;
    /// only a hit refreshes the timestamp and moves the entry to the head.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let expired = self
            .order
            .get(id)
            .map_or(true, |entry| entry.is_expired(now, self.ttl));

        if expired {
            self.evict(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        let value = self.order.get_mut(id).map(|entry| {
            entry.touch(now);
            entry.value.clone()
        })?;
        self.order.move_to_front(id);
        self.stats.record_hit();
        Some(value)
    }

    // == Set ==
    /// Stores `value` under `key`, making it the most recently used entry.
    ///
    /// Returns the key evicted to make room, if any.
    pub fn set(&mut self, key: K, value: V) -> Option<K> {
        self.set_at(key, value, Instant::now())
    }

    /// Like [`set`](Self::set) with an explicit current instant.
    ///
    /// Overwriting an existing key never evicts. Inserting a new key into a
    /// full store always evicts the tail first, expired or not.
    pub fn set_at(&mut self, key: K, value: V, now: Instant) -> Option<K> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(id) {
                entry.value = value;
                entry.touch(now);
                self.order.move_to_front(id);
                return None;
            }
            // Stale index slot, drop it and fall through to a fresh insert
            self.index.remove(&key);
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        let id = self.order.push_front(Entry::new(key.clone(), value, now));
        self.index.insert(key, id);
        evicted
    }

    // == Evict ==
    /// Removes `key` from both the index and the recency list.
    ///
    /// Evicting an absent key is a no-op and returns false.
    pub fn evict(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                self.order.remove(id);
                true
            }
            None => false,
        }
    }

    /// Drops the least recently used entry and returns its key.
    fn evict_oldest(&mut self) -> Option<K> {
        let id = self.order.back()?;
        let entry = self.order.remove(id)?;
        self.index.remove(&entry.key);
        self.stats.record_eviction();
        Some(entry.key)
    }

    // == Sweep Expired ==
    /// Removes every entry idle for longer than the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    /// Like [`sweep_expired`](Self::sweep_expired) with an explicit instant.
    pub fn sweep_expired_at(&mut self, now: Instant) -> usize {
        let expired: Vec<SlotId> = self
            .order
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, self.ttl))
            .map(|(id, _)| id)
            .collect();

        let mut removed = 0;
        for id in expired {
            if let Some(entry) = self.order.remove(id) {
                self.index.remove(&entry.key);
                removed += 1;
            }
        }

        self.stats.record_expirations(removed);
        removed
    }

    // == Accessors ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Checks for `key` without touching it or judging its age.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.order.iter().map(|(_, entry)| entry.key.clone()).collect()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats;
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Consistency Check ==
    /// Verifies the index and the recency list describe the same entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.order.assert_consistent();
        assert_eq!(self.index.len(), self.order.len(), "index/order size mismatch");
        assert!(self.index.len() <= self.capacity, "capacity exceeded");
        for (key, &id) in &self.index {
            let entry = self.order.get(id).expect("indexed slot must be occupied");
            assert!(entry.key == *key, "slot holds a different key");
        }
    }
}

//! Cache Entry Module
//!
//! Defines the unit of storage held by the recency list.

use std::time::{Duration, Instant};

// == Slot Handle ==
/// Stable handle of an entry inside the recency list arena.
pub type SlotId = usize;

// == Cache Entry ==
/// A single cached key/value pair with its idle-time bookkeeping.
///
/// `prev` points towards the head (more recently used), `next` towards the
/// tail (less recently used). Both are `None` while the entry is unlinked.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Last time the entry was written or read as a hit
    pub last_touched: Instant,
    pub(crate) prev: Option<SlotId>,
    pub(crate) next: Option<SlotId>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry touched at `now`.
    pub fn new(key: K, value: V, now: Instant) -> Self {
        Self {
            key,
            value,
            last_touched: now,
            prev: None,
            next: None,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was last touched.
    ///
    /// Saturates to zero if `now` is earlier than `last_touched`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_touched)
    }

    // == Is Expired ==
    /// Checks whether the entry has been idle longer than `ttl`.
    ///
    /// A zero `ttl` makes every entry expired.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        ttl.is_zero() || self.age(now) > ttl
    }

    // == Touch ==
    /// Refreshes the idle timer.
    pub fn touch(&mut self, now: Instant) {
        self.last_touched = now;
    }

    /// Returns true if the entry has no neighbours.
    pub fn is_detached(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

//! LRU Recency List Module
//!
//! Implements the doubly linked recency list as an arena of slots.
//! Links are slot handles rather than pointers, so entries never own
//! each other and move-to-front stays O(1).

use crate::cache::entry::{Entry, SlotId};

// == Recency List ==
/// Doubly linked list of entries ordered by recency.
///
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Removed slots are recycled through a free list, so a `SlotId` stays
/// valid until its entry is removed.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    /// Entry storage, `None` marks a free slot
    slots: Vec<Option<Entry<K, V>>>,
    /// Free slots available for reuse
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Stores `entry` in a slot and splices it in as most recently used.
    pub fn push_front(&mut self, entry: Entry<K, V>) -> SlotId {
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(entry);
                id
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        self.link_front(id);
        self.len += 1;
        id
    }

    // == Move To Front ==
    /// Marks the entry in `id` as most recently used.
    pub fn move_to_front(&mut self, id: SlotId) {
        if self.head == Some(id) || self.get(id).is_none() {
            return;
        }
        self.unlink(id);
        self.link_front(id);
    }

    // == Remove ==
    /// Unlinks the entry in `id` and releases its slot.
    ///
    /// Returns None if the slot is already free.
    pub fn remove(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        self.get(id)?;
        self.unlink(id);

        let entry = self.slots.get_mut(id).and_then(Option::take)?;
        self.free.push(id);
        self.len -= 1;
        Some(entry)
    }

    // == Back ==
    /// Returns the slot of the least recently used entry.
    pub fn back(&self) -> Option<SlotId> {
        self.tail
    }

    // == Front ==
    /// Returns the slot of the most recently used entry.
    pub fn front(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the entry stored in `id`.
    pub fn get(&self, id: SlotId) -> Option<&Entry<K, V>> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Returns the entry stored in `id` mutably.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    // == Iter ==
    /// Walks the list from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Link Helpers ==
    /// Detaches `id` from its neighbours, repairing head and tail.
    fn unlink(&mut self, id: SlotId) {
        let head = self.head;
        let (prev, next) = match self.get_mut(id) {
            Some(entry) if entry.prev.is_some() || entry.next.is_some() => {
                (entry.prev.take(), entry.next.take())
            }
            // A detached entry is only linked when it is the sole element
            Some(_) if head == Some(id) => (None, None),
            _ => return,
        };

        match prev {
            Some(p) => {
                if let Some(entry) = self.get_mut(p) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(entry) = self.get_mut(n) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Splices a detached `id` in at the head.
    fn link_front(&mut self, id: SlotId) {
        let old_head = self.head;

        if let Some(entry) = self.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head {
            Some(h) => {
                if let Some(entry) = self.get_mut(h) {
                    entry.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }

        self.head = Some(id);
    }

    // == Consistency Check ==
    /// Verifies the chain is acyclic, doubly consistent and matches `len`.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut seen = std::collections::HashSet::new();
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(id) = cursor {
            assert!(seen.insert(id), "slot {} reachable twice", id);
            let entry = self.get(id).expect("linked slot must be occupied");
            assert_eq!(entry.prev, prev, "broken back link at slot {}", id);
            prev = Some(id);
            cursor = entry.next;
        }

        assert_eq!(self.tail, prev, "tail does not terminate the chain");
        assert_eq!(seen.len(), self.len, "len does not match chain length");
        assert_eq!(
            self.slots.iter().filter(|s| s.is_some()).count(),
            self.len,
            "occupied slots do not match len"
        );
    }
}

// == Iterator ==
/// Iterator over `(SlotId, &Entry)` from head to tail.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<SlotId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (SlotId, &'a Entry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.cursor?;
        let entry = self.list.get(id)?;
        self.cursor = entry.next;
        self.remaining -= 1;
        Some((id, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn keys(list: &RecencyList<&'static str, u32>) -> Vec<&'static str> {
        list.iter().map(|(_, e)| e.key).collect()
    }

    fn push(list: &mut RecencyList<&'static str, u32>, key: &'static str) -> SlotId {
        list.push_front(Entry::new(key, 0, Instant::now()))
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<&str, u32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_push_front_orders_by_recency() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");
        let c = push(&mut list, "c");

        assert_eq!(keys(&list), vec!["c", "b", "a"]);
        assert_eq!(list.front(), Some(c));
        assert_eq!(list.back(), Some(a));
        list.assert_consistent();
    }

    #[test]
    fn test_move_to_front_from_tail() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");
        push(&mut list, "c");

        list.move_to_front(a);

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        list.assert_consistent();
    }

    #[test]
    fn test_move_to_front_from_middle() {
        let mut list = RecencyList::new();

        push(&mut list, "a");
        let b = push(&mut list, "b");
        push(&mut list, "c");

        list.move_to_front(b);

        assert_eq!(keys(&list), vec!["b", "c", "a"]);
        list.assert_consistent();
    }

    #[test]
    fn test_move_to_front_head_is_noop() {
        let mut list = RecencyList::new();

        push(&mut list, "a");
        let b = push(&mut list, "b");

        list.move_to_front(b);

        assert_eq!(keys(&list), vec!["b", "a"]);
        list.assert_consistent();
    }

    #[test]
    fn test_remove_tail_and_head() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");
        let c = push(&mut list, "c");

        assert_eq!(list.remove(a).map(|e| e.key), Some("a"));
        assert_eq!(list.remove(c).map(|e| e.key), Some("c"));

        assert_eq!(keys(&list), vec!["b"]);
        assert_eq!(list.front(), list.back());
        list.assert_consistent();
    }

    #[test]
    fn test_remove_only_entry() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        assert!(list.remove(a).is_some());

        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.assert_consistent();
    }

    #[test]
    fn test_remove_free_slot_is_noop() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");

        assert!(list.remove(a).is_some());
        assert!(list.remove(a).is_none());
        assert!(list.remove(42).is_none());

        assert_eq!(keys(&list), vec!["b"]);
        list.assert_consistent();
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");
        list.remove(a);

        let c = push(&mut list, "c");

        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["c", "b"]);
        list.assert_consistent();
    }

    #[test]
    fn test_get_mut_updates_entry() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        if let Some(entry) = list.get_mut(a) {
            entry.value = 7;
        }

        assert_eq!(list.get(a).map(|e| e.value), Some(7));
    }
}

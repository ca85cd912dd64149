//! Partitioned LRU: resident entries on top, recent evictions below.
//!
//! Two independent [`LruCache`]s. Anything the *top* list evicts is handed to
//! the *bottom* list together with its value, so a later lookup can still
//! find it there. The bottom list is itself capacity-bounded; what it evicts
//! is gone for good.
//!
//! ```text
//!   put(k, v)
//!      │
//!      ▼
//!   ┌─────────────────────────────┐   evicted (key, value)   ┌─────────────────────────────┐
//!   │ top     MRU ─► ... ─► LRU   │ ────────────────────────►│ bottom  MRU ─► ... ─► LRU   │──► dropped
//!   └─────────────────────────────┘                          └─────────────────────────────┘
//!        resident entries                                         ghost history (with values)
//! ```
//!
//! [`PartitionedLru::resize`] is eager: it shrinks the top list immediately,
//! feeding every evicted entry into the bottom list. Plain
//! [`LruCache::resize`] only moves the bound.

use tracing::trace;

use crate::error::InvariantError;
use crate::key::CacheKey;
use crate::policy::lru::LruCache;

/// Which half of a [`PartitionedLru`] answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Residency {
    /// Found among resident entries.
    Top,
    /// Found in ghost history.
    Bottom,
}

/// Resident LRU list backed by a bounded history of its own evictions.
///
/// # Example
///
/// ```
/// use arcache::policy::partitioned::{PartitionedLru, Residency};
///
/// let mut part = PartitionedLru::new(2);
/// assert!(!part.put(1, "a"));
/// assert!(!part.put(2, "b"));
/// assert!(part.put(3, "c")); // top overflowed, 1 moved to bottom
///
/// assert_eq!(part.get(3), Some((&"c", Residency::Top)));
/// assert_eq!(part.get(1), Some((&"a", Residency::Bottom)));
/// assert_eq!(part.get(9), None);
/// ```
#[derive(Debug)]
pub struct PartitionedLru<V> {
    top: LruCache<V>,
    bottom: LruCache<V>,
}

impl<V> PartitionedLru<V> {
    /// Creates a partition whose top and bottom lists both hold `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            top: LruCache::new(capacity),
            bottom: LruCache::new(capacity),
        }
    }

    /// Looks in the top list, then in the bottom list.
    ///
    /// A top hit does not touch the bottom list. A bottom hit promotes the
    /// entry within the bottom list only.
    pub fn get(&mut self, key: CacheKey) -> Option<(&V, Residency)> {
        if self.top.contains(key) {
            return self.top.get(key).map(|value| (value, Residency::Top));
        }
        self.bottom.get(key).map(|value| (value, Residency::Bottom))
    }

    /// Inserts into the top list; returns `true` if that pushed an entry
    /// down into the bottom list.
    ///
    /// A key is never in both halves: any older copy of `key` in the bottom
    /// list is dropped first.
    pub fn put(&mut self, key: CacheKey, value: V) -> bool {
        if self.bottom.remove(key).is_some() {
            trace!(key, "stale ghost dropped on re-put");
        }
        match self.top.put(key, value) {
            Some((old_key, old_value)) => {
                self.demote(old_key, old_value);
                true
            },
            None => false,
        }
    }

    /// Sets the top list's bound and evicts down to it right away.
    pub fn resize(&mut self, capacity: usize) {
        self.top.resize(capacity);
        while self.top.len() > capacity {
            let Some((key, value)) = self.top.evict() else {
                break;
            };
            self.demote(key, value);
        }
    }

    fn demote(&mut self, key: CacheKey, value: V) {
        if let Some((expired, _)) = self.bottom.put(key, value) {
            trace!(key = expired, "ghost entry expired");
        }
    }

    /// Removes `key` from the top list only.
    pub fn remove_top(&mut self, key: CacheKey) -> Option<V> {
        self.top.remove(key)
    }

    /// Removes `key` from the bottom list only.
    pub fn remove_bottom(&mut self, key: CacheKey) -> Option<V> {
        self.bottom.remove(key)
    }

    /// Resident entries.
    pub fn top(&self) -> &LruCache<V> {
        &self.top
    }

    /// Ghost history.
    pub fn bottom(&self) -> &LruCache<V> {
        &self.bottom
    }

    /// `true` if `key` is resident (top list).
    pub fn contains(&self, key: CacheKey) -> bool {
        self.top.contains(key)
    }

    /// `true` if `key` is remembered in the bottom list.
    pub fn in_history(&self, key: CacheKey) -> bool {
        self.bottom.contains(key)
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    /// Number of ghost entries.
    pub fn ghost_len(&self) -> usize {
        self.bottom.len()
    }

    pub fn clear(&mut self) {
        self.top.clear();
        self.bottom.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.top
            .check_invariants()
            .map_err(|e| e.in_layer("top"))?;
        self.bottom
            .check_invariants()
            .map_err(|e| e.in_layer("bottom"))?;
        if self.bottom.len() > self.bottom.capacity().max(1) {
            return Err(InvariantError::new(format!(
                "holds {} entries, bound {}",
                self.bottom.len(),
                self.bottom.capacity()
            ))
            .in_layer("bottom"));
        }
        Ok(())
    }
}

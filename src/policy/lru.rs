//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity cache with O(1) `get`/`put`/`remove`/`evict`. It is the
//! building block for [`PartitionedLru`](crate::policy::partitioned::PartitionedLru)
//! and, through it, [`ArcCache`](crate::policy::arc::ArcCache).
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<V>                             │
//!   │                                                                  │
//!   │   values: key → V                      slots: key → SlotId       │
//!   │   ┌──────┬─────────┐                   ┌──────┬────────┐         │
//!   │   │ key  │ value   │                   │ key  │ SlotId │         │
//!   │   ├──────┼─────────┤                   ├──────┼────────┤         │
//!   │   │  7   │  "a"    │                   │  7   │  id_0  │──┐      │
//!   │   │  9   │  "b"    │                   │  9   │  id_2  │──┼──┐   │
//!   │   │  3   │  "c"    │                   │  3   │  id_1  │──┼──┼─┐ │
//!   │   └──────┴─────────┘                   └──────┴────────┘  │  │ │ │
//!   │                                                           ▼  ▼ ▼ │
//!   │   order: RecencyList<CacheKey>                                   │
//!   │     head (MRU) ─► [7] ◄──► [9] ◄──► [3] ◄── tail (LRU)           │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The three structures always hold the same key set. Only `put`, `remove`,
//! `evict` and `clear` add or drop keys, and each touches all three.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(D) on a full cache (capacity = 3)
//!
//!   Before:  head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!   1. evict() unlinks [C], returns (C, value)
//!   2. [D] is linked in at head
//!   After:   head ─► [D] ◄──► [A] ◄──► [B] ◄── tail
//! ```
//!
//! ## Capacity Rules
//!
//! - Capacity is enforced only by `put`. [`LruCache::resize`] just stores the
//!   new bound; a later overflowing `put` drains the excess.
//! - An empty cache always accepts its first entry, so a capacity-0 cache
//!   holds at most one entry. `len() <= max(capacity, 1)` after every `put`.
//!
//! ## Example Usage
//!
//! ```
//! use arcache::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put(1, "a");
//! cache.put(2, "b");
//! assert_eq!(cache.put(3, "c"), Some((1, "a")));
//!
//! assert_eq!(cache.get(2), Some(&"b"));
//! assert_eq!(cache.put(4, "d"), Some((3, "c")));
//! assert_eq!(cache.get(3), None);
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; `get` mutates recency order. Wrap in a mutex to share.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::{RecencyList, SlotId};
use crate::error::InvariantError;
use crate::key::CacheKey;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::CoreCache;

/// Fixed-capacity LRU cache keyed by [`CacheKey`].
///
/// Values live in one map, list handles in another, and recency order in an
/// arena-backed [`RecencyList`]. See the [module docs](self) for the layout.
#[derive(Debug)]
pub struct LruCache<V> {
    values: FxHashMap<CacheKey, V>,
    slots: FxHashMap<CacheKey, SlotId>,
    order: RecencyList<CacheKey>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<V> LruCache<V> {
    /// Creates an empty cache bounded to `capacity` entries.
    ///
    /// A capacity of 0 is accepted; such a cache keeps at most the most
    /// recently inserted entry.
    ///
    /// # Example
    ///
    /// ```
    /// use arcache::policy::lru::LruCache;
    ///
    /// let cache: LruCache<String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: RecencyList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss leaves recency order untouched.
    pub fn get(&mut self, key: CacheKey) -> Option<&V> {
        let Some(&id) = self.slots.get(&key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.values.get(&key)
    }

    /// Returns the value for `key` without promoting it.
    pub fn peek(&self, key: CacheKey) -> Option<&V> {
        self.values.get(&key)
    }

    /// Inserts or overwrites `key` and makes it most recently used.
    ///
    /// Returns the entry evicted to make room, if any. Overwriting an
    /// existing key never evicts. When a lazy [`resize`](Self::resize) left
    /// the cache more than one entry over its bound, all of the excess is
    /// evicted and only the oldest of those entries is returned.
    pub fn put(&mut self, key: CacheKey, value: V) -> Option<(CacheKey, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.slots.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.order.move_to_front(id);
            self.values.insert(key, value);
            return None;
        }

        let mut evicted = None;
        while !self.order.is_empty() && self.order.len() >= self.capacity {
            let entry = self.evict();
            if evicted.is_some() {
                if let Some((dropped, _)) = &entry {
                    trace!(key = *dropped, capacity = self.capacity, "drained entry after shrink");
                }
            }
            evicted = evicted.or(entry);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.order.push_front(key);
        self.slots.insert(key, id);
        self.values.insert(key, value);
        evicted
    }

    /// Removes and returns the least recently used entry.
    ///
    /// Returns `None` on an empty cache.
    pub fn evict(&mut self) -> Option<(CacheKey, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let key = self.order.pop_back()?;
        self.slots.remove(&key);
        let value = self.values.remove(&key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        Some((key, value))
    }

    /// Removes `key` if present and returns its value.
    pub fn remove(&mut self, key: CacheKey) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.slots.remove(&key)?;
        self.order.remove(id);
        let value = self.values.remove(&key);

        #[cfg(feature = "metrics")]
        {
            if value.is_some() {
                self.metrics.record_remove_found();
            }
        }

        value
    }

    /// Changes the capacity bound without evicting anything.
    ///
    /// ```
    /// use arcache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(3);
    /// cache.put(1, 'a');
    /// cache.put(2, 'b');
    /// cache.put(3, 'c');
    ///
    /// cache.resize(1);
    /// assert_eq!(cache.len(), 3);
    ///
    /// // the next new key drains down to the bound
    /// assert_eq!(cache.put(4, 'd'), Some((1, 'a')));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn resize(&mut self, capacity: usize) {
        #[cfg(feature = "metrics")]
        self.metrics.record_resize();

        self.capacity = capacity;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, key: CacheKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Most recently used key.
    pub fn mru_key(&self) -> Option<CacheKey> {
        self.order.front().copied()
    }

    /// Least recently used key, the next one `evict` would remove.
    pub fn lru_key(&self) -> Option<CacheKey> {
        self.order.back().copied()
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = CacheKey> + '_ {
        self.order.iter().copied()
    }

    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.values.clear();
        self.slots.clear();
        self.order.clear();
    }

    /// Verifies that the value map, handle map and recency list agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.values.len();
        if self.slots.len() != len || self.order.len() != len {
            return Err(InvariantError::new(format!(
                "size mismatch: values {}, slots {}, recency list {}",
                len,
                self.slots.len(),
                self.order.len()
            )));
        }

        match (self.order.front_id(), self.order.back_id()) {
            (None, None) if len == 0 => {},
            (Some(head), Some(tail)) if len > 0 => {
                if (head == tail) != (len == 1) {
                    return Err(InvariantError::new(format!(
                        "head == tail must hold iff len == 1 (len {})",
                        len
                    )));
                }
            },
            (head, tail) => {
                return Err(InvariantError::new(format!(
                    "head {:?} / tail {:?} inconsistent with len {}",
                    head, tail, len
                )));
            },
        }

        let mut walked = 0usize;
        for id in self.order.iter_ids() {
            walked += 1;
            if walked > len {
                return Err(InvariantError::new("recency list longer than index"));
            }
            let key = self
                .order
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("stale handle {:?}", id)))?;
            if self.slots.get(key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "key {} is linked at {:?} but indexed elsewhere",
                    key, id
                )));
            }
            if !self.values.contains_key(key) {
                return Err(InvariantError::new(format!("key {} has no value", key)));
            }
        }
        if walked != len {
            return Err(InvariantError::new(format!(
                "walked {} nodes, expected {}",
                walked, len
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("LruCache invariant violated: {}", err);
        }
    }
}

#[cfg(feature = "metrics")]
impl<V> LruCache<V> {
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            resizes: self.metrics.resizes,
            cache_len: self.values.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<V> {
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<V> CoreCache<V> for LruCache<V> {
    fn get(&mut self, key: CacheKey) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn put(&mut self, key: CacheKey, value: V) {
        LruCache::put(self, key, value);
    }

    fn contains(&self, key: CacheKey) -> bool {
        LruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

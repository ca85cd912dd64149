//! Adaptive Replacement Cache (ARC) replacement policy.
//!
//! Balances recency against frequency by splitting the cache into two
//! [`PartitionedLru`]s and moving a split parameter `p` whenever a request
//! hits the ghost history of one side.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                              ArcCache<V> Layout                             │
//! │                                                                             │
//! │   L1: PartitionedLru (seen once)          L2: PartitionedLru (seen again)   │
//! │   ┌─────────────────────────────┐         ┌─────────────────────────────┐   │
//! │   │ top     bound = p           │         │ top     bound = cap - p     │   │
//! │   │ MRU ─► [..] ◄──► [..] ◄ LRU │         │ MRU ─► [..] ◄──► [..] ◄ LRU │   │
//! │   ├─────────────────────────────┤         ├─────────────────────────────┤   │
//! │   │ bottom  evicted from top    │         │ bottom  evicted from top    │   │
//! │   │ (keys and values)           │         │ (keys and values)           │   │
//! │   └─────────────────────────────┘         └─────────────────────────────┘   │
//! │                                                                             │
//! │   p ∈ [0, cap]                                                              │
//! │   • hit in L1 bottom → p grows  (give L1 more room, favour recency)         │
//! │   • hit in L2 bottom → p shrinks (give L2 more room, favour frequency)      │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   get(k), first match wins:
//!     1. k in L1 top     → move (k, v) into L2, return v
//!     2. k in L1 bottom  → delta = max(1, |L2 bottom| / |L1 bottom|)
//!                          p = min(p + delta, cap), resize tops,
//!                          move (k, v) into L2, return v
//!     3. k in L2 top     → return v (promoted within L2 top)
//!     4. k in L2 bottom  → delta = max(1, |L1 bottom| / |L2 bottom|)
//!                          p = max(p - delta, 0), resize tops,
//!                          move (k, v) back into L2 top, return v
//!     5. otherwise       → None, nothing changes
//!
//!   put(k, v): always into L1 top
//! ```
//!
//! Resizing the tops is eager: after a ghost hit L1 top holds at most `p`
//! entries and L2 top at most `cap - p`, with the excess pushed into each
//! side's bottom list.
//!
//! ## Differences from textbook ARC
//!
//! - Ghost lists keep values, so a ghost hit is answered from memory.
//! - `put` never looks at L2. A key already in L2 can also become resident
//!   in L1; `get` checks L1 first, so the newer value wins and is moved over
//!   L2's copy.
//! - Within one side a key is never both resident and a ghost. Re-putting a
//!   key that sits in L1's ghost list drops the old ghost, so the new value
//!   is served and no ghost hit is counted.
//! - Each side's bottom list is bounded by `cap`, independently of the tops.
//!
//! ## Example Usage
//!
//! ```
//! use arcache::policy::arc::ArcCache;
//!
//! let mut cache = ArcCache::new(8);
//! cache.put(1, "one");
//! cache.put(2, "two");
//!
//! // second touch moves the entry from L1 to L2
//! assert_eq!(cache.get(1), Some(&"one"));
//! assert!(cache.l2().contains(1));
//! assert!(!cache.l1().contains(1));
//!
//! assert_eq!(cache.get(42), None);
//! assert_eq!(cache.p(), 4);
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; every `get` may reorganise both partitions.

use tracing::{debug, trace};

use crate::error::InvariantError;
use crate::key::CacheKey;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ArcMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ArcMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::policy::partitioned::PartitionedLru;
use crate::traits::CoreCache;

/// Adaptive Replacement Cache over two partitioned LRU lists.
///
/// `ArcCache::new(capacity)` gives each partition `capacity / 2` slots in
/// its top and its bottom list, and starts `p` at that same value.
///
/// # Example
///
/// ```
/// use arcache::policy::arc::ArcCache;
///
/// let mut cache = ArcCache::new(4);
/// cache.put(1, 'a');
/// cache.put(2, 'b');
/// cache.put(3, 'c'); // L1 top holds 2, so 1 drops into L1 bottom
///
/// assert!(cache.l1().in_history(1));
/// assert_eq!(cache.get(1), Some(&'a')); // ghost hit
/// assert!(cache.l2().contains(1));
/// ```
#[derive(Debug)]
pub struct ArcCache<V> {
    l1: PartitionedLru<V>,
    l2: PartitionedLru<V>,
    p: usize,
    cap: usize,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: ArcMetrics,
}

impl<V> ArcCache<V> {
    /// Creates an empty cache for a nominal `capacity`.
    ///
    /// ```
    /// use arcache::policy::arc::ArcCache;
    ///
    /// let cache: ArcCache<String> = ArcCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert_eq!(cache.target(), 50);
    /// assert_eq!(cache.p(), 50);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let cap = capacity / 2;
        Self {
            l1: PartitionedLru::new(cap),
            l2: PartitionedLru::new(cap),
            p: cap,
            cap,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: ArcMetrics::default(),
        }
    }

    /// Looks `key` up in L1 then L2, adapting `p` on ghost hits.
    pub fn get(&mut self, key: CacheKey) -> Option<&V> {
        if self.l1.contains(key) {
            let value = self.l1.remove_top(key)?;
            self.l2.put(key, value);

            #[cfg(feature = "metrics")]
            {
                self.metrics.record_get_hit();
                self.metrics.record_l1_to_l2_promotion();
            }

            trace!(key, "promoted from L1 to L2");
            return self.l2.top().peek(key);
        }

        if self.l1.in_history(key) {
            let delta = (self.l2.ghost_len() / self.l1.ghost_len()).max(1);
            self.p = (self.p + delta).min(self.cap);
            debug!(key, delta, p = self.p, target = self.cap, "L1 ghost hit");

            #[cfg(feature = "metrics")]
            {
                self.metrics.record_get_hit();
                self.metrics.record_l1_ghost_hit();
                self.metrics.record_p_increase();
            }

            let value = self.l1.remove_bottom(key)?;
            self.rebalance();
            self.l2.put(key, value);
            return self.l2.top().peek(key);
        }

        if self.l2.contains(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_hit();

            return self.l2.get(key).map(|(value, _)| value);
        }

        if self.l2.in_history(key) {
            let delta = (self.l1.ghost_len() / self.l2.ghost_len()).max(1);
            self.p = self.p.saturating_sub(delta);
            debug!(key, delta, p = self.p, target = self.cap, "L2 ghost hit");

            #[cfg(feature = "metrics")]
            {
                self.metrics.record_get_hit();
                self.metrics.record_l2_ghost_hit();
                self.metrics.record_p_decrease();
            }

            let value = self.l2.remove_bottom(key)?;
            self.rebalance();
            self.l2.put(key, value);
            return self.l2.top().peek(key);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_miss();

        None
    }

    /// Inserts `(key, value)` into L1's resident list.
    pub fn put(&mut self, key: CacheKey, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.l1.put(key, value) {
            trace!(key, ghosts = self.l1.ghost_len(), "L1 overflowed into ghost history");
        }
    }

    fn rebalance(&mut self) {
        self.l1.resize(self.p);
        self.l2.resize(self.cap - self.p);
    }

    /// Current target size of L1's resident list.
    pub fn p(&self) -> usize {
        self.p
    }

    /// Capacity passed to [`new`](Self::new).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Upper bound for `p`: half the nominal capacity.
    pub fn target(&self) -> usize {
        self.cap
    }

    /// Resident entries across both partitions.
    ///
    /// A key resident in both L1 and L2 is counted twice.
    pub fn len(&self) -> usize {
        self.l1.len() + self.l2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.l1.is_empty() && self.l2.is_empty()
    }

    /// `true` if `key` is resident in either partition. Ghosts don't count.
    pub fn contains(&self, key: CacheKey) -> bool {
        self.l1.contains(key) || self.l2.contains(key)
    }

    pub fn l1(&self) -> &PartitionedLru<V> {
        &self.l1
    }

    pub fn l2(&self) -> &PartitionedLru<V> {
        &self.l2
    }

    /// Drops every entry and ghost, and restores the initial split.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.l1.clear();
        self.l2.clear();
        self.p = self.cap;
        self.l1.resize(self.cap);
        self.l2.resize(self.cap);
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.p > self.cap {
            return Err(InvariantError::new(format!(
                "p = {} exceeds target {}",
                self.p, self.cap
            )));
        }
        self.l1
            .check_invariants()
            .map_err(|e| e.in_layer("L1"))?;
        self.l2
            .check_invariants()
            .map_err(|e| e.in_layer("L2"))?;
        for (name, side) in [("L1", &self.l1), ("L2", &self.l2)] {
            let bound = side.top().capacity().max(1);
            if side.len() > bound {
                return Err(InvariantError::new(format!(
                    "holds {} resident entries, bound {}",
                    side.len(),
                    bound
                ))
                .in_layer(name));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.l1.top().debug_validate_invariants();
        self.l1.bottom().debug_validate_invariants();
        self.l2.top().debug_validate_invariants();
        self.l2.bottom().debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("ArcCache invariant violated: {}", err);
        }
    }
}

#[cfg(feature = "metrics")]
impl<V> ArcCache<V> {
    pub fn metrics_snapshot(&self) -> ArcMetricsSnapshot {
        ArcMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            l1_to_l2_promotions: self.metrics.l1_to_l2_promotions,
            l1_ghost_hits: self.metrics.l1_ghost_hits,
            l2_ghost_hits: self.metrics.l2_ghost_hits,
            p_increases: self.metrics.p_increases,
            p_decreases: self.metrics.p_decreases,
            cache_len: self.len(),
            capacity: self.capacity,
            p: self.p,
        }
    }
}

#[cfg(feature = "metrics")]
impl<V> MetricsSnapshotProvider<ArcMetricsSnapshot> for ArcCache<V> {
    fn snapshot(&self) -> ArcMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<V> CoreCache<V> for ArcCache<V> {
    fn get(&mut self, key: CacheKey) -> Option<&V> {
        ArcCache::get(self, key)
    }

    fn put(&mut self, key: CacheKey, value: V) {
        ArcCache::put(self, key, value)
    }

    fn contains(&self, key: CacheKey) -> bool {
        ArcCache::contains(self, key)
    }

    fn len(&self) -> usize {
        ArcCache::len(self)
    }

    fn capacity(&self) -> usize {
        ArcCache::capacity(self)
    }

    fn clear(&mut self) {
        ArcCache::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (L1 resident, L1 ghosts, L2 resident, L2 ghosts, p)
    fn shape<V>(cache: &ArcCache<V>) -> (usize, usize, usize, usize, usize) {
        (
            cache.l1().len(),
            cache.l1().ghost_len(),
            cache.l2().len(),
            cache.l2().ghost_len(),
            cache.p(),
        )
    }

    /// Builds a cache of nominal capacity 4 whose L2 has 1 in its ghost list
    /// and 3, 2 resident.
    fn with_l2_ghost() -> ArcCache<&'static str> {
        let mut cache = ArcCache::new(4);
        for (k, v) in [(1, "a"), (2, "b"), (3, "c")] {
            cache.put(k, v);
            assert_eq!(cache.get(k), Some(&v));
        }
        assert!(cache.l2().in_history(1));
        cache
    }

    // ==============================================
    // Construction
    // ==============================================

    mod construction {
        use super::*;

        #[test]
        fn halves_capacity() {
            let cache: ArcCache<u32> = ArcCache::new(9);
            assert_eq!(cache.capacity(), 9);
            assert_eq!(cache.target(), 4);
            assert_eq!(cache.p(), 4);
            assert_eq!(cache.l1().top().capacity(), 4);
            assert_eq!(cache.l1().bottom().capacity(), 4);
            assert_eq!(cache.l2().top().capacity(), 4);
            assert_eq!(cache.l2().bottom().capacity(), 4);
            assert!(cache.is_empty());
        }

        #[test]
        fn tiny_capacities_still_serve_requests() {
            for capacity in 0..2 {
                let mut cache = ArcCache::new(capacity);
                assert_eq!(cache.target(), 0);
                cache.put(1, "a");
                assert_eq!(cache.get(1), Some(&"a"));
                cache.put(2, "b");
                assert_eq!(cache.get(2), Some(&"b"));
                cache.debug_validate_invariants();
            }
        }
    }

    // ==============================================
    // Hit Classification
    // ==============================================

    mod classification {
        use super::*;

        #[test]
        fn round_trip_through_l1_top() {
            let mut cache = ArcCache::new(8);
            cache.put(7, "seven");
            assert_eq!(cache.get(7), Some(&"seven"));
            assert!(!cache.l1().contains(7));
            assert!(cache.l2().contains(7));
            assert_eq!(cache.p(), 4);
            cache.debug_validate_invariants();
        }

        #[test]
        fn l2_top_hit_keeps_entry_in_l2() {
            let mut cache = ArcCache::new(8);
            cache.put(1, "a");
            cache.get(1);
            cache.put(2, "b");
            cache.get(2);
            assert_eq!(cache.l2().top().mru_key(), Some(2));

            assert_eq!(cache.get(1), Some(&"a"));
            assert_eq!(cache.l2().top().mru_key(), Some(1));
            assert_eq!(cache.l2().len(), 2);
            assert_eq!(cache.p(), 4);
        }

        #[test]
        fn miss_changes_nothing() {
            let mut cache = with_l2_ghost();
            cache.put(10, "x");
            let before = shape(&cache);
            assert_eq!(cache.get(999), None);
            assert_eq!(shape(&cache), before);
            cache.debug_validate_invariants();
        }

        #[test]
        fn put_always_lands_in_l1() {
            let mut cache = ArcCache::new(8);
            cache.put(1, "a");
            cache.get(1);
            cache.put(1, "b");
            assert!(cache.l1().contains(1));
            assert!(cache.l2().contains(1));
            assert_eq!(cache.len(), 2);

            // L1's newer value is moved over L2's copy
            assert_eq!(cache.get(1), Some(&"b"));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(1), Some(&"b"));
        }

        #[test]
        fn re_put_after_eviction_serves_new_value() {
            let mut cache = ArcCache::new(4);
            cache.put(1, "a");
            cache.put(2, "x");
            cache.put(3, "y"); // 1 -> L1 ghosts
            assert!(cache.l1().in_history(1));

            cache.put(1, "b");
            assert!(cache.l1().contains(1));
            assert!(!cache.l1().in_history(1));

            assert_eq!(cache.get(1), Some(&"b"));
            assert_eq!(cache.get(1), Some(&"b"));
            // both lookups were ordinary hits
            assert_eq!(cache.p(), cache.target());
            assert!(!cache.l1().in_history(1));
            assert!(!cache.l2().in_history(1));
            cache.debug_validate_invariants();
        }
    }

    // ==============================================
    // Adaptation of p
    // ==============================================

    mod adaptation {
        use super::*;

        #[test]
        fn l1_ghost_hit_at_target_keeps_p_clamped() {
            let mut cache = ArcCache::new(4);
            cache.put(1, "a");
            cache.put(2, "b");
            cache.put(3, "c");
            assert!(cache.l1().in_history(1));

            assert_eq!(cache.get(1), Some(&"a"));
            assert_eq!(cache.p(), cache.target());
            assert!(cache.l2().contains(1));
            assert!(!cache.l1().in_history(1));
            // L2 top was resized to cap - p = 0 but still accepts one entry
            assert_eq!(cache.l2().top().capacity(), 0);
            assert_eq!(cache.l2().len(), 1);
            cache.debug_validate_invariants();
        }

        #[test]
        fn l2_ghost_hit_lowers_p_and_resizes_tops() {
            let mut cache = with_l2_ghost();
            assert_eq!(cache.p(), 2);

            assert_eq!(cache.get(1), Some(&"a"));
            assert_eq!(cache.p(), 1);
            assert_eq!(cache.l1().top().capacity(), 1);
            assert_eq!(cache.l2().top().capacity(), 1);

            // L2 top shrank to one slot: 2 and 3 were pushed into its ghosts
            assert_eq!(cache.l2().top().keys().collect::<Vec<_>>(), vec![1]);
            assert_eq!(cache.l2().bottom().keys().collect::<Vec<_>>(), vec![3, 2]);
            cache.debug_validate_invariants();
        }

        #[test]
        fn l1_ghost_hit_raises_p_by_ghost_ratio() {
            let mut cache = with_l2_ghost();
            cache.get(1); // p = 1, L2 ghosts [3, 2]

            cache.put(10, "x");
            cache.put(11, "y"); // L1 top bound 1: 10 into L1 ghosts
            assert!(cache.l1().in_history(10));

            // delta = max(1, 2 / 1) = 2, clamped to target
            assert_eq!(cache.get(10), Some(&"x"));
            assert_eq!(cache.p(), 2);
            assert_eq!(cache.l2().top().capacity(), 0);
            cache.debug_validate_invariants();
        }

        #[test]
        fn l2_ghost_hit_lowers_p_by_ghost_ratio() {
            let mut cache = ArcCache::new(8);
            for k in 1..=5 {
                cache.put(k, k);
                cache.get(k);
            }
            // L2 top [5, 4, 3, 2], L2 ghosts [1]
            for k in 10..=15 {
                cache.put(k, k);
            }
            // L1 top [15, 14, 13, 12], L1 ghosts [11, 10]
            assert_eq!(shape(&cache), (4, 2, 4, 1, 4));

            // delta = max(1, 2 / 1) = 2
            assert_eq!(cache.get(1), Some(&1));
            assert_eq!(cache.p(), 2);
            assert_eq!(cache.l1().top().capacity(), 2);
            assert_eq!(cache.l2().top().capacity(), 2);

            assert_eq!(cache.l1().top().keys().collect::<Vec<_>>(), vec![15, 14]);
            assert_eq!(
                cache.l1().bottom().keys().collect::<Vec<_>>(),
                vec![13, 12, 11, 10]
            );
            assert_eq!(cache.l2().top().keys().collect::<Vec<_>>(), vec![1, 5]);
            assert_eq!(cache.l2().bottom().keys().collect::<Vec<_>>(), vec![4, 3, 2]);
            cache.debug_validate_invariants();
        }

        #[test]
        fn p_never_underflows() {
            let mut cache = with_l2_ghost();
            cache.get(1); // p = 1
            assert_eq!(cache.get(2), Some(&"b")); // p = 0
            assert_eq!(cache.p(), 0);
            assert_eq!(cache.get(3), Some(&"c")); // still 0
            assert_eq!(cache.p(), 0);
            assert_eq!(cache.l2().top().capacity(), cache.target());

            // L1 top bound is 0, yet a fresh insert is still served
            cache.put(20, "z");
            assert_eq!(cache.get(20), Some(&"z"));
            cache.debug_validate_invariants();
        }

        #[test]
        fn clear_restores_initial_split() {
            let mut cache = with_l2_ghost();
            cache.get(1);
            assert_ne!(cache.p(), cache.target());

            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.l1().ghost_len(), 0);
            assert_eq!(cache.l2().ghost_len(), 0);
            assert_eq!(cache.p(), cache.target());
            assert_eq!(cache.l2().top().capacity(), cache.target());
            cache.debug_validate_invariants();
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn snapshot_counts_ghost_hits() {
            let mut cache = with_l2_ghost();
            cache.get(1);
            cache.get(99);

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.insert_calls, 3);
            assert_eq!(snap.l1_to_l2_promotions, 3);
            assert_eq!(snap.l2_ghost_hits, 1);
            assert_eq!(snap.p_decreases, 1);
            assert_eq!(snap.get_hits, 4);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.p, 1);
        }
    }

    // ==============================================
    // Property Tests
    // ==============================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Put(u64, u32),
            Get(u64),
            PutThenGet(u64, u32),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => (0u64..32, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
                5 => (0u64..32).prop_map(Op::Get),
                1 => (0u64..32, any::<u32>()).prop_map(|(k, v)| Op::PutThenGet(k, v)),
            ]
        }

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_p_stays_within_target(
                capacity in 0usize..20,
                ops in prop::collection::vec(op_strategy(), 0..300)
            ) {
                let mut cache: ArcCache<u32> = ArcCache::new(capacity);
                for op in ops {
                    match op {
                        Op::Put(k, v) => cache.put(k, v),
                        Op::Get(k) => {
                            let resident = cache.contains(k)
                                || cache.l1().in_history(k)
                                || cache.l2().in_history(k);
                            prop_assert_eq!(cache.get(k).is_some(), resident);
                        },
                        Op::PutThenGet(k, v) => {
                            cache.put(k, v);
                            prop_assert_eq!(cache.get(k), Some(&v));
                        },
                    }
                    prop_assert!(cache.p() <= cache.target());
                    prop_assert!(cache.check_invariants().is_ok());
                }
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_miss_is_idempotent(
                keys in prop::collection::vec(0u64..16, 0..60),
                absent in 100u64..200
            ) {
                let mut cache: ArcCache<u64> = ArcCache::new(6);
                for k in keys {
                    cache.put(k, k);
                    cache.get(k / 2);
                }
                let before = shape(&cache);
                prop_assert_eq!(cache.get(absent), None);
                prop_assert_eq!(shape(&cache), before);
            }
        }
    }
}

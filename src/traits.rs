//! # Cache Trait
//!
//! [`CoreCache`] is the surface shared by [`LruCache`](crate::policy::lru::LruCache)
//! and [`ArcCache`](crate::policy::arc::ArcCache). Code that only needs the
//! `get`-then-`put` access pattern (workload replay, benches, the builder's
//! [`Cache`](crate::builder::Cache) wrapper) is written against it.
//!
//! ```text
//!                  ┌─────────────────────────────────────┐
//!                  │           CoreCache<V>              │
//!                  │                                     │
//!                  │  get(&mut, key) → Option<&V>        │
//!                  │  put(&mut, key, V)                  │
//!                  │  contains(&, key) → bool            │
//!                  │  len / is_empty / capacity          │
//!                  │  clear(&mut)                        │
//!                  └──────────────────┬──────────────────┘
//!                                     │
//!                    ┌────────────────┴────────────────┐
//!                    ▼                                 ▼
//!             LruCache<V>                        ArcCache<V>
//! ```
//!
//! `get` takes `&mut self` on purpose: a hit reorders recency state in both
//! policies, and in ARC it can also move entries between lists and retune
//! the split parameter.

use crate::key::CacheKey;

/// Core cache operations supported by every policy in this crate.
///
/// # Example
///
/// ```
/// use arcache::policy::lru::LruCache;
/// use arcache::traits::CoreCache;
///
/// fn warm<C: CoreCache<String>>(cache: &mut C, keys: &[u64]) {
///     for &key in keys {
///         cache.put(key, format!("v{key}"));
///     }
/// }
///
/// let mut cache = LruCache::new(4);
/// warm(&mut cache, &[1, 2, 3]);
/// assert_eq!(CoreCache::len(&cache), 3);
/// assert_eq!(CoreCache::get(&mut cache, 2), Some(&"v2".to_string()));
/// ```
pub trait CoreCache<V> {
    /// Looks up `key`, updating policy state on a hit.
    fn get(&mut self, key: CacheKey) -> Option<&V>;

    /// Inserts or refreshes `key`. Anything the policy evicts is dropped.
    fn put(&mut self, key: CacheKey, value: V);

    /// Checks residency without touching recency state.
    fn contains(&self, key: CacheKey) -> bool;

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity the cache was configured with.
    fn capacity(&self) -> usize;

    /// Drops every entry, including ghost history.
    fn clear(&mut self);
}

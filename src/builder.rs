//! Unified cache builder for the LRU and ARC policies.
//!
//! Lets callers pick a policy at runtime and drive it through one type,
//! [`Cache`], while still offering typed constructors for each policy.
//!
//! ## Example
//!
//! ```rust
//! use arcache::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100).build::<String>(CachePolicy::Arc);
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(1), Some(&"hello".to_string()));
//! assert_eq!(cache.policy(), CachePolicy::Arc);
//! ```

use std::fmt;

use crate::error::ConfigError;
use crate::key::CacheKey;
use crate::policy::arc::ArcCache;
use crate::policy::lru::LruCache;
use crate::traits::CoreCache;

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Adaptive Replacement Cache.
    Arc,
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CachePolicy::Lru => f.write_str("LRU"),
            CachePolicy::Arc => f.write_str("ARC"),
        }
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
#[derive(Debug)]
pub struct Cache<V> {
    inner: CacheInner<V>,
}

#[derive(Debug)]
enum CacheInner<V> {
    Lru(LruCache<V>),
    Arc(ArcCache<V>),
}

impl<V> Cache<V> {
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Arc(_) => CachePolicy::Arc,
        }
    }

    /// Get a reference to a value by key.
    pub fn get(&mut self, key: CacheKey) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Arc(arc) => arc.get(key),
        }
    }

    /// Insert a key-value pair. Evicted entries are dropped.
    pub fn put(&mut self, key: CacheKey, value: V) {
        match &mut self.inner {
            CacheInner::Lru(lru) => {
                lru.put(key, value);
            },
            CacheInner::Arc(arc) => arc.put(key, value),
        }
    }

    /// Check if a key is resident.
    pub fn contains(&self, key: CacheKey) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Arc(arc) => arc.contains(key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Arc(arc) => arc.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the configured capacity.
    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Arc(arc) => arc.capacity(),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Arc(arc) => arc.clear(),
        }
    }
}

impl<V> CoreCache<V> for Cache<V> {
    fn get(&mut self, key: CacheKey) -> Option<&V> {
        Cache::get(self, key)
    }

    fn put(&mut self, key: CacheKey, value: V) {
        Cache::put(self, key, value)
    }

    fn contains(&self, key: CacheKey) -> bool {
        Cache::contains(self, key)
    }

    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn capacity(&self) -> usize {
        Cache::capacity(self)
    }

    fn clear(&mut self) {
        Cache::clear(self)
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a cache with the specified policy.
    ///
    /// Any capacity is accepted; see [`try_build`](Self::try_build) for the
    /// validating variant.
    ///
    /// ```rust
    /// use arcache::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<String>(CachePolicy::Lru);
    /// let arc = CacheBuilder::new(100).build::<String>(CachePolicy::Arc);
    /// assert_eq!(lru.capacity(), arc.capacity());
    /// ```
    pub fn build<V>(self, policy: CachePolicy) -> Cache<V> {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(self.build_lru()),
            CachePolicy::Arc => CacheInner::Arc(self.build_arc()),
        };
        Cache { inner }
    }

    /// Like [`build`](Self::build), but rejects capacities the policy
    /// cannot use.
    pub fn try_build<V>(self, policy: CachePolicy) -> Result<Cache<V>, ConfigError> {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(self.try_build_lru()?),
            CachePolicy::Arc => CacheInner::Arc(self.try_build_arc()?),
        };
        Ok(Cache { inner })
    }

    pub fn build_lru<V>(self) -> LruCache<V> {
        LruCache::new(self.capacity)
    }

    pub fn build_arc<V>(self) -> ArcCache<V> {
        ArcCache::new(self.capacity)
    }

    /// Builds an LRU cache, rejecting capacity 0.
    pub fn try_build_lru<V>(self) -> Result<LruCache<V>, ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::capacity_too_small(CachePolicy::Lru, self.capacity, 1));
        }
        Ok(self.build_lru())
    }

    /// Builds an ARC cache, rejecting capacities below 2.
    ///
    /// ARC halves its capacity, so anything smaller leaves both partitions
    /// with a bound of zero.
    pub fn try_build_arc<V>(self) -> Result<ArcCache<V>, ConfigError> {
        if self.capacity < 2 {
            return Err(ConfigError::capacity_too_small(CachePolicy::Arc, self.capacity, 2));
        }
        Ok(self.build_arc())
    }
}

//! Replacement policies, from the plain LRU list up to ARC.
//!
//! ```text
//!   ArcCache ──► 2 × PartitionedLru ──► 2 × LruCache ──► RecencyList + maps
//! ```

pub mod arc;
pub mod lru;
pub mod partitioned;

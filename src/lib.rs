//! arcache: an Adaptive Replacement Cache built from an O(1) LRU.
//!
//! ```text
//!   ArcCache ──► PartitionedLru (L1, L2) ──► LruCache ──► RecencyList / SlotArena
//! ```
//!
//! Keys are fixed-width [`CacheKey`]s; [`key::parse_ipv4_key`] derives them
//! from access-log lines, [`workload::replay`] drives a cache over a log and
//! [`workload::UniformLog`] generates one.

pub mod builder;
pub mod ds;
pub mod error;
pub mod key;
pub mod policy;
pub mod prelude;
pub mod traits;
pub mod workload;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::key::{parse_ipv4_key, CacheKey, KeyParseError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{ArcMetricsSnapshot, LruMetricsSnapshot};
pub use crate::policy::arc::ArcCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::partitioned::{PartitionedLru, Residency};

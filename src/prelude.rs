pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::key::{parse_ipv4_key, CacheKey, KeyParseError};
pub use crate::policy::arc::ArcCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::partitioned::{PartitionedLru, Residency};
pub use crate::traits::CoreCache;
pub use crate::workload::{replay, replay_reader, ReplayError, ReplayStats, UniformLog};

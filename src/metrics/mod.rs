//! Hit/miss and adaptation counters, compiled in with the `metrics` feature.
//!
//! Recorders ([`traits`]) only write counters; snapshots ([`snapshot`]) are
//! plain `Copy` structs read out through `metrics_snapshot()` on each cache.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

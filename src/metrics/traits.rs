//! # Metrics Trait Hierarchy
//!
//! Recording is split from snapshotting so cache code only ever calls
//! `record_*` methods and never reads its own counters.
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     CoreMetricsRecorder     │
//!                 │  get_hit/get_miss/insert    │
//!                 │  evict/clear                │
//!                 └──────────────┬──────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌─────────────┐              ┌─────────────┐
//!          │     Lru     │              │     Arc     │
//!          │  Recorder   │              │  Recorder   │
//!          └─────────────┘              └─────────────┘
//!
//!   Consumption:  MetricsSnapshotProvider<S>  (tests, benches, replay)
//! ```

/// Common counters for both policies.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LRU-only signals.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_resize(&mut self);
}

/// ARC classification and adaptation signals.
pub trait ArcMetricsRecorder: CoreMetricsRecorder {
    fn record_l1_to_l2_promotion(&mut self);
    fn record_l1_ghost_hit(&mut self);
    fn record_l2_ghost_hit(&mut self);
    fn record_p_increase(&mut self);
    fn record_p_decrease(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

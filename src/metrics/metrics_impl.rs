use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder, LruMetricsRecorder};

// ---------------------------------------------------------------------------
// LruMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub resizes: u64,
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {}
}

impl LruMetricsRecorder for LruMetrics {
    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }
    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }
    fn record_resize(&mut self) {
        self.resizes += 1;
    }
}

// ---------------------------------------------------------------------------
// ArcMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ArcMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub l1_to_l2_promotions: u64,
    pub l1_ghost_hits: u64,
    pub l2_ghost_hits: u64,
    pub p_increases: u64,
    pub p_decreases: u64,
}

impl CoreMetricsRecorder for ArcMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    // inserts, updates and evictions are counted by the underlying LRU lists
    fn record_insert_new(&mut self) {}
    fn record_insert_update(&mut self) {}
    fn record_evict_call(&mut self) {}
    fn record_evicted_entry(&mut self) {}
    fn record_clear(&mut self) {}
}

impl ArcMetricsRecorder for ArcMetrics {
    fn record_l1_to_l2_promotion(&mut self) {
        self.l1_to_l2_promotions += 1;
    }
    fn record_l1_ghost_hit(&mut self) {
        self.l1_ghost_hits += 1;
    }
    fn record_l2_ghost_hit(&mut self) {
        self.l2_ghost_hits += 1;
    }
    fn record_p_increase(&mut self) {
        self.p_increases += 1;
    }
    fn record_p_decrease(&mut self) {
        self.p_decreases += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_metrics_split_hits_and_misses() {
        let mut m = LruMetrics::default();
        m.record_get_hit();
        m.record_get_miss();
        m.record_get_miss();
        assert_eq!(m.get_calls, 3);
        assert_eq!(m.get_hits, 1);
        assert_eq!(m.get_misses, 2);
    }

    #[test]
    fn arc_metrics_track_adaptation() {
        let mut m = ArcMetrics::default();
        m.record_l1_ghost_hit();
        m.record_p_increase();
        m.record_l2_ghost_hit();
        m.record_p_decrease();
        m.record_evicted_entry();
        assert_eq!(m.l1_ghost_hits, 1);
        assert_eq!(m.l2_ghost_hits, 1);
        assert_eq!(m.p_increases, 1);
        assert_eq!(m.p_decreases, 1);
    }
}

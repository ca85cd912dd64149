use arcache::policy::arc::ArcCache;
use arcache::policy::partitioned::PartitionedLru;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

fn bench_arc_promote(c: &mut Criterion) {
    c.bench_function("arc_l1_to_l2_promotion", |b| {
        b.iter_batched(
            || {
                let mut cache = ArcCache::new(2048);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    let _ = black_box(cache.get(black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_arc_ghost_hits(c: &mut Criterion) {
    c.bench_function("arc_l1_ghost_hits", |b| {
        b.iter_batched(
            || {
                // L1 top holds 512: the first 512 keys end up as ghosts
                let mut cache = ArcCache::new(1024);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..512u64 {
                    let _ = black_box(cache.get(black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_arc_miss(c: &mut Criterion) {
    let mut cache = ArcCache::new(1024);
    for i in 0..1024u64 {
        cache.put(i, i);
    }
    c.bench_function("arc_miss", |b| {
        b.iter(|| black_box(cache.get(black_box(u64::MAX))).is_none())
    });
}

fn bench_partition_resize(c: &mut Criterion) {
    c.bench_function("partitioned_eager_resize", |b| {
        b.iter_batched(
            || {
                let mut part = PartitionedLru::new(1024);
                for i in 0..1024u64 {
                    part.put(i, i);
                }
                part
            },
            |mut part| {
                part.resize(black_box(256));
                part
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_arc_promote,
    bench_arc_ghost_hits,
    bench_arc_miss,
    bench_partition_resize
);
criterion_main!(benches);

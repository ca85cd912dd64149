//! Workload benchmarks: LRU vs ARC under identical access-log replays.
//!
//! Run with: `cargo bench --bench workloads`
//!
//! Each workload is rendered once as IPv4 log lines and replayed through
//! [`arcache::workload::replay`], so parsing and the hit test are included in
//! the measured time. Hit rates are printed before timing starts.

use arcache::builder::{CacheBuilder, CachePolicy};
use arcache::workload::{address_pool, replay, UniformLog};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 100;
const POOL: usize = 1_000;
const LINES: usize = 50_000;
const SEED: u64 = 42;

#[derive(Debug, Clone, Copy)]
enum Workload {
    /// Every address in the pool equally likely.
    Uniform,
    /// `hot_prob` of requests go to the first `hot_fraction` of the pool.
    HotSet { hot_fraction: f64, hot_prob: f64 },
    /// Hot set traffic interrupted by one-off sequential scans.
    ScanMix { scan_every: usize, scan_length: usize },
}

fn hot_pick(rng: &mut SmallRng, hot_fraction: f64, hot_prob: f64) -> usize {
    let hot = ((POOL as f64 * hot_fraction) as usize).max(1);
    if rng.gen_bool(hot_prob) {
        rng.gen_range(0..hot)
    } else {
        rng.gen_range(hot..POOL)
    }
}

fn render(workload: Workload) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(SEED);
    match workload {
        // same shape gen-log writes, shortened to LINES
        Workload::Uniform => UniformLog {
            pool: POOL,
            lines: LINES,
        }
        .lines(&mut rng)
        .collect(),
        Workload::HotSet {
            hot_fraction,
            hot_prob,
        } => {
            let pool = address_pool(&mut rng, POOL);
            (0..LINES)
                .map(|_| pool[hot_pick(&mut rng, hot_fraction, hot_prob)].clone())
                .collect()
        },
        Workload::ScanMix {
            scan_every,
            scan_length,
        } => {
            let pool = address_pool(&mut rng, POOL);
            let mut lines = Vec::with_capacity(LINES);
            let mut scan_key = 0u32;
            while lines.len() < LINES {
                if lines.len() % scan_every == scan_every - 1 {
                    // scans hit addresses outside the pool and never repeat
                    for _ in 0..scan_length {
                        scan_key += 1;
                        let [_, b, c, d] = scan_key.to_be_bytes();
                        lines.push(format!("10.{b}.{c}.{d}"));
                    }
                } else {
                    lines.push(pool[hot_pick(&mut rng, 0.05, 0.9)].clone());
                }
            }
            lines.truncate(LINES);
            lines
        },
    }
}

fn workloads() -> Vec<(&'static str, Workload)> {
    vec![
        ("uniform", Workload::Uniform),
        (
            "hotset_90_10",
            Workload::HotSet {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        (
            "scan_mix",
            Workload::ScanMix {
                scan_every: 5_000,
                scan_length: 400,
            },
        ),
    ]
}

fn print_hit_rates(rendered: &[(&'static str, Vec<String>)]) {
    println!();
    println!("{:<14} {:>8} {:>8}", "workload", "LRU", "ARC");
    for (name, lines) in rendered {
        let rates: Vec<f64> = [CachePolicy::Lru, CachePolicy::Arc]
            .into_iter()
            .map(|policy| {
                let mut cache = CacheBuilder::new(CAPACITY).build::<String>(policy);
                replay(&mut cache, lines).map_or(0.0, |stats| stats.hit_rate())
            })
            .collect();
        println!(
            "{:<14} {:>7.2}% {:>7.2}%",
            name,
            rates[0] * 100.0,
            rates[1] * 100.0
        );
    }
    println!();
}

fn bench_replay(c: &mut Criterion) {
    let rendered: Vec<_> = workloads()
        .into_iter()
        .map(|(name, workload)| (name, render(workload)))
        .collect();
    print_hit_rates(&rendered);

    let mut group = c.benchmark_group("replay");
    group.throughput(Throughput::Elements(LINES as u64));
    for (name, lines) in &rendered {
        for policy in [CachePolicy::Lru, CachePolicy::Arc] {
            group.bench_with_input(
                BenchmarkId::new(policy.to_string(), name),
                lines,
                |b, lines| {
                    b.iter(|| {
                        let mut cache = CacheBuilder::new(CAPACITY).build::<String>(policy);
                        replay(&mut cache, lines)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_replay);
criterion_main!(benches);

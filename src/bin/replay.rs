//! Replays an IPv4 access log through the LRU and ARC caches and prints the
//! hit statistics of each.
//!
//! ```text
//! replay [--capacity N] [--policy both|lru|arc] [PATH]
//! ```
//!
//! The log is streamed from disk once per policy. `gen-log` writes a
//! suitable one to the default path. Set `RUST_LOG=arcache=debug` to watch
//! ARC adapt its split.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use arcache::builder::{CacheBuilder, CachePolicy};
use arcache::workload::replay_reader;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Which caches to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum PolicyArg {
    /// LRU first, then ARC
    #[default]
    Both,
    Lru,
    Arc,
}

impl PolicyArg {
    fn policies(self) -> &'static [CachePolicy] {
        match self {
            PolicyArg::Both => &[CachePolicy::Lru, CachePolicy::Arc],
            PolicyArg::Lru => &[CachePolicy::Lru],
            PolicyArg::Arc => &[CachePolicy::Arc],
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "replay", version, about = "Replay an IPv4 access log through LRU and ARC caches")]
struct Args {
    /// Access log with one IPv4 address at the start of each line
    #[arg(default_value = "data/ips_uniform.log")]
    path: PathBuf,

    /// Nominal cache capacity
    #[arg(short, long, default_value_t = 100)]
    capacity: usize,

    #[arg(short, long, value_enum, default_value_t = PolicyArg::Both)]
    policy: PolicyArg,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    for (i, &policy) in args.policy.policies().iter().enumerate() {
        let mut cache = CacheBuilder::new(args.capacity).try_build::<String>(policy)?;
        let file = File::open(&args.path)
            .map_err(|e| format!("failed to open {}: {}", args.path.display(), e))?;

        if i > 0 {
            println!("================");
        }
        println!("Running {} test...", policy);
        info!(
            path = %args.path.display(),
            capacity = args.capacity,
            %policy,
            "replaying access log"
        );

        let stats = replay_reader(&mut cache, BufReader::new(file))?;
        println!("{}", stats);
    }

    Ok(())
}

//! Writes a synthetic IPv4 access log for the `replay` binary.
//!
//! ```text
//! gen-log [--pool N] [--lines N] [--seed S] [PATH]
//! ```
//!
//! Draws `--pool` random addresses, then writes `--lines` lines, each one
//! address picked uniformly from that pool. Missing parent directories are
//! created.

use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use arcache::workload::UniformLog;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gen-log", version, about = "Generate a uniform IPv4 access log")]
struct Args {
    /// Output file
    #[arg(default_value = "data/ips_uniform.log")]
    path: PathBuf,

    /// Number of distinct addresses to draw from
    #[arg(long, default_value_t = 1_000)]
    pool: usize,

    /// Number of log lines to write
    #[arg(short = 'n', long, default_value_t = 100_000)]
    lines: usize,

    /// Seed for a reproducible log; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(dir) = args.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| format!("failed to create {}: {}", dir.display(), e))?;
    }
    let file = File::create(&args.path)
        .map_err(|e| format!("failed to create {}: {}", args.path.display(), e))?;

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let log = UniformLog {
        pool: args.pool,
        lines: args.lines,
    };
    log.write_to(&mut rng, BufWriter::new(file))?;

    info!(
        path = %args.path.display(),
        pool = log.pool,
        lines = log.lines,
        "access log written"
    );
    Ok(())
}

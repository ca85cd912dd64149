//! Access-log replay.
//!
//! Each log line names a client by IPv4 address. Replaying a log performs,
//! per line, a lookup by the address's key followed by an insert of the line
//! itself. A lookup counts as a hit only if it returns that exact line.
//!
//! ```text
//!   line ──► parse_ipv4_key ──► get(key) == line ? hit : miss ──► put(key, line)
//! ```
//!
//! [`replay`] takes lines already in memory; [`replay_reader`] streams them
//! from any [`BufRead`]. [`UniformLog`] writes the synthetic log both are
//! usually fed with.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::net::Ipv4Addr;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::key::{parse_ipv4_key, KeyParseError};
use crate::traits::CoreCache;

/// Failure while streaming a log through [`replay_reader`].
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read access log: {0}")]
    Read(#[from] io::Error),

    #[error("line {line}: {source}")]
    Key {
        line: u64,
        #[source]
        source: KeyParseError,
    },
}

/// Hit and miss counts from one replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub hits: u64,
    pub misses: u64,
}

impl ReplayStats {
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of requests that hit; `0.0` for an empty replay.
    pub fn hit_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

impl fmt::Display for ReplayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total examples: {}", self.total())?;
        writeln!(f, "Hit: {}", self.hits)?;
        writeln!(f, "Miss: {}", self.misses)?;
        write!(f, "Hit rate: {:.4}", self.hit_rate())
    }
}

/// Replays `lines` against `cache`.
///
/// Stops at the first line whose address cannot be parsed; the cache keeps
/// whatever the preceding lines did to it.
///
/// # Example
///
/// ```
/// use arcache::policy::lru::LruCache;
/// use arcache::workload::replay;
///
/// let log = ["10.0.0.1", "10.0.0.2", "10.0.0.1", "10.0.0.3"];
/// let mut cache = LruCache::new(2);
/// let stats = replay(&mut cache, log).unwrap();
/// assert_eq!((stats.hits, stats.misses), (1, 3));
/// ```
pub fn replay<C, I>(cache: &mut C, lines: I) -> Result<ReplayStats, KeyParseError>
where
    C: CoreCache<String> + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut stats = ReplayStats::default();
    for line in lines {
        serve(cache, &mut stats, line.as_ref())?;
    }
    finish(cache, &stats);
    Ok(stats)
}

/// Replays a log read line by line from `reader`.
///
/// Only the current line is held in memory. Read failures and unparsable
/// addresses stop the replay; parse errors carry the 1-based line number.
///
/// ```
/// use std::io::Cursor;
///
/// use arcache::policy::arc::ArcCache;
/// use arcache::workload::replay_reader;
///
/// let log = Cursor::new("10.0.0.1\n10.0.0.1\n");
/// let mut cache = ArcCache::new(4);
/// let stats = replay_reader(&mut cache, log).unwrap();
/// assert_eq!((stats.hits, stats.misses), (1, 1));
/// ```
pub fn replay_reader<C, R>(cache: &mut C, reader: R) -> Result<ReplayStats, ReplayError>
where
    C: CoreCache<String> + ?Sized,
    R: BufRead,
{
    let mut stats = ReplayStats::default();
    for line in reader.lines() {
        let line = line?;
        serve(cache, &mut stats, &line).map_err(|source| ReplayError::Key {
            line: stats.total() + 1,
            source,
        })?;
    }
    finish(cache, &stats);
    Ok(stats)
}

fn serve<C>(cache: &mut C, stats: &mut ReplayStats, line: &str) -> Result<(), KeyParseError>
where
    C: CoreCache<String> + ?Sized,
{
    let key = parse_ipv4_key(line)?;
    if cache.get(key).is_some_and(|cached| cached == line) {
        stats.hits += 1;
    } else {
        stats.misses += 1;
    }
    cache.put(key, line.to_owned());
    Ok(())
}

fn finish<C>(cache: &C, stats: &ReplayStats)
where
    C: CoreCache<String> + ?Sized,
{
    debug!(
        hits = stats.hits,
        misses = stats.misses,
        resident = cache.len(),
        "replay finished"
    );
}

/// Draws `count` random IPv4 addresses in dotted-quad form.
///
/// Addresses are drawn independently, so the pool may repeat one.
pub fn address_pool<R: Rng>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| Ipv4Addr::from(rng.gen::<[u8; 4]>()).to_string())
        .collect()
}

/// Synthetic access log: `lines` requests, each naming an address picked
/// uniformly from a pool of `pool` random addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLog {
    pub pool: usize,
    pub lines: usize,
}

impl Default for UniformLog {
    fn default() -> Self {
        Self {
            pool: 1_000,
            lines: 100_000,
        }
    }
}

impl UniformLog {
    /// Yields the log lines without trailing newlines.
    ///
    /// An empty pool yields nothing.
    pub fn lines<'r, R: Rng>(&self, rng: &'r mut R) -> impl Iterator<Item = String> + 'r {
        let pool = address_pool(rng, self.pool);
        let count = if pool.is_empty() { 0 } else { self.lines };
        (0..count).map(move |_| pool[rng.gen_range(0..pool.len())].clone())
    }

    /// Writes the log to `out`, one address per line.
    ///
    /// ```
    /// use rand::rngs::SmallRng;
    /// use rand::SeedableRng;
    ///
    /// use arcache::workload::UniformLog;
    ///
    /// let mut out = Vec::new();
    /// let log = UniformLog { pool: 10, lines: 50 };
    /// log.write_to(&mut SmallRng::seed_from_u64(7), &mut out).unwrap();
    /// assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 50);
    /// ```
    pub fn write_to<R: Rng, W: Write>(&self, rng: &mut R, mut out: W) -> io::Result<()> {
        for line in self.lines(rng) {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        debug!(pool = self.pool, lines = self.lines, "uniform log written");
        Ok(())
    }
}

//! Error types for the arcache library.
//!
//! - [`ConfigError`]: a [`CacheBuilder`](crate::builder::CacheBuilder)
//!   `try_build*` call asked for a capacity the policy cannot work with.
//! - [`InvariantError`]: a `check_invariants` call found the maps and lists
//!   of a cache layer out of sync. Outer layers prefix the name of the inner
//!   layer that failed, so the message reads as a path:
//!   `L2: bottom: size mismatch: ...`.
//!
//! Key parsing has its own error, [`KeyParseError`](crate::key::KeyParseError).
//!
//! ```
//! use arcache::builder::{CacheBuilder, CachePolicy};
//!
//! assert!(CacheBuilder::new(8).try_build_arc::<String>().is_ok());
//!
//! // ARC splits its capacity in half; one slot leaves both sides empty.
//! let err = CacheBuilder::new(1).try_build_arc::<String>().unwrap_err();
//! assert_eq!(err.policy(), CachePolicy::Arc);
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::error::Error;
use std::fmt;

use crate::builder::CachePolicy;

/// A cache layer's internal structures disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError {
    layers: Vec<&'static str>,
    detail: String,
}

impl InvariantError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            layers: Vec::new(),
            detail: detail.into(),
        }
    }

    /// Records that the failure happened inside `layer`.
    ///
    /// Called from the inside out; the outermost layer ends up first.
    pub fn in_layer(mut self, layer: &'static str) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Layer names from outermost to innermost.
    pub fn layers(&self) -> &[&'static str] {
        &self.layers
    }

    /// What was wrong, without the layer path.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for layer in &self.layers {
            write!(f, "{}: ", layer)?;
        }
        f.write_str(&self.detail)
    }
}

impl Error for InvariantError {}

/// A policy was asked to run with fewer slots than it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigError {
    policy: CachePolicy,
    capacity: usize,
    minimum: usize,
}

impl ConfigError {
    pub fn capacity_too_small(policy: CachePolicy, capacity: usize, minimum: usize) -> Self {
        Self {
            policy,
            capacity,
            minimum,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// The rejected capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Smallest capacity the policy accepts.
    pub fn minimum(&self) -> usize {
        self.minimum
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} capacity must be >= {}, got {}",
            self.policy, self.minimum, self.capacity
        )
    }
}

impl Error for ConfigError {}

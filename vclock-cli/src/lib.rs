//! File-level operations behind the `vclock` binary.
//!
//! Clocks are stored as the JSON documents produced by [`vclock::encode_json`]
//! with string actor ids.

use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use vclock::{CausalOrder, HybridClock, ProviderConfig, TimestampProvider};

/// The clock type handled by the CLI.
pub type Clock = HybridClock<String>;

/// Loads provider configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<ProviderConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading provider config {}", path.display()))?;
    let config = ProviderConfig::from_json_str(&contents)
        .with_context(|| format!("parsing provider config {}", path.display()))?;
    info!(path = %path.display(), strategy = %config.strategy, "Loaded provider config");
    Ok(config)
}

/// Creates a fresh clock for `actor`.
#[must_use]
pub fn new_clock(actor: &str, config: &ProviderConfig) -> Clock {
    HybridClock::with_provider(actor.to_string(), TimestampProvider::from_config(config))
}

/// Reads and decodes a clock from a file.
pub fn load_clock(path: &Path) -> Result<Clock> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading clock {}", path.display()))?;
    let clock = vclock::decode_json(&contents)
        .with_context(|| format!("decoding clock {}", path.display()))?;
    debug!(path = %path.display(), "Loaded clock");
    Ok(clock)
}

/// Encodes a clock, writing it to `output` when given.
///
/// Returns the encoded document.
pub fn store_clock(clock: &Clock, output: Option<&Path>) -> Result<String> {
    let encoded = vclock::encode_json(clock).context("encoding clock")?;
    if let Some(path) = output {
        fs::write(path, &encoded).with_context(|| format!("writing clock {}", path.display()))?;
        info!(path = %path.display(), "Stored clock");
    }
    Ok(encoded)
}

/// Result of comparing two clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub partial: CausalOrder,
    pub total: Ordering,
}

/// Compares two clocks under both orders.
#[must_use]
pub fn compare(left: &Clock, right: &Clock) -> Comparison {
    Comparison {
        partial: left.partial_order(right),
        total: left.total_order(right),
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let partial = match self.partial {
            CausalOrder::Before => "before",
            CausalOrder::After => "after",
            CausalOrder::Concurrent => "concurrent",
        };
        let total = match self.total {
            Ordering::Less => "<",
            Ordering::Equal => "==",
            Ordering::Greater => ">",
        };
        write!(f, "partial: {partial}\ntotal: left {total} right")
    }
}

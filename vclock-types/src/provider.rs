//! Timestamp providers.
//!
//! A provider is a zero-argument source of `f64` values used only to break
//! ties between causally concurrent clocks. Three strategies exist:
//! - [`TimestampProviderStrategy::WallClock`]: seconds since the Unix epoch
//! - [`TimestampProviderStrategy::MonotonicIncrease`]: last value + 1.0 per call
//! - [`TimestampProviderStrategy::Constant`]: the same value every call
//!
//! The strategy is persisted with a clock so a decoded clock can resume the
//! same sequence (see [`TimestampProvider::resume`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// How a [`TimestampProvider`] produces values.
///
/// Persisted as its integer tag: 0 = wall-clock, 1 = monotonic-increase,
/// 2 = constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum TimestampProviderStrategy {
    #[default]
    WallClock,
    MonotonicIncrease,
    Constant,
}

impl TimestampProviderStrategy {
    /// Returns the persisted integer tag.
    #[must_use]
    pub const fn tag(self) -> u64 {
        match self {
            Self::WallClock => 0,
            Self::MonotonicIncrease => 1,
            Self::Constant => 2,
        }
    }

    /// Returns the configuration name of the strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WallClock => "wall-clock",
            Self::MonotonicIncrease => "monotonic-increase",
            Self::Constant => "constant",
        }
    }
}

impl TryFrom<u64> for TimestampProviderStrategy {
    type Error = crate::Error;

    fn try_from(tag: u64) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::WallClock),
            1 => Ok(Self::MonotonicIncrease),
            2 => Ok(Self::Constant),
            other => Err(crate::Error::UnknownStrategy(other)),
        }
    }
}

impl From<TimestampProviderStrategy> for u64 {
    fn from(strategy: TimestampProviderStrategy) -> Self {
        strategy.tag()
    }
}

impl fmt::Display for TimestampProviderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimestampProviderStrategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wall-clock" => Ok(Self::WallClock),
            "monotonic-increase" => Ok(Self::MonotonicIncrease),
            "constant" => Ok(Self::Constant),
            other => match other.parse::<u64>() {
                Ok(tag) => Self::try_from(tag),
                Err(_) => Err(crate::Error::InvalidStrategy(other.to_string())),
            },
        }
    }
}

#[derive(Debug, Clone)]
enum Source {
    WallClock,
    /// Bits of the last value handed out, shared by every clone.
    Monotonic(Arc<AtomicU64>),
    Constant(f64),
}

/// A source of tie-break timestamps.
///
/// Clones share state: a monotonic provider cloned into a derived clock keeps
/// counting the same sequence regardless of which actor asks.
#[derive(Debug, Clone)]
pub struct TimestampProvider {
    source: Source,
}

impl TimestampProvider {
    /// Real time in seconds since the Unix epoch.
    #[must_use]
    pub fn wall_clock() -> Self {
        Self {
            source: Source::WallClock,
        }
    }

    /// Counts up by 1.0 from the origin; the first value is 1.0.
    #[must_use]
    pub fn monotonic() -> Self {
        Self::monotonic_from(0.0)
    }

    /// Counts up by 1.0 starting after `last`.
    #[must_use]
    pub fn monotonic_from(last: f64) -> Self {
        Self {
            source: Source::Monotonic(Arc::new(AtomicU64::new(last.to_bits()))),
        }
    }

    /// Always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            source: Source::Constant(value),
        }
    }

    /// Creates a fresh provider for a strategy with its default origin.
    #[must_use]
    pub fn for_strategy(strategy: TimestampProviderStrategy) -> Self {
        match strategy {
            TimestampProviderStrategy::WallClock => Self::wall_clock(),
            TimestampProviderStrategy::MonotonicIncrease => Self::monotonic(),
            TimestampProviderStrategy::Constant => Self::constant(0.0),
        }
    }

    /// Rebuilds a provider that continues after a persisted timestamp.
    ///
    /// Monotonic providers resume after `last`; constant providers keep
    /// returning `last`; wall-clock providers ignore it.
    #[must_use]
    pub fn resume(strategy: TimestampProviderStrategy, last: f64) -> Self {
        match strategy {
            TimestampProviderStrategy::WallClock => Self::wall_clock(),
            TimestampProviderStrategy::MonotonicIncrease => Self::monotonic_from(last),
            TimestampProviderStrategy::Constant => Self::constant(last),
        }
    }

    /// Builds a provider from configuration.
    #[must_use]
    pub fn from_config(config: &ProviderConfig) -> Self {
        match config.strategy {
            TimestampProviderStrategy::WallClock => Self::wall_clock(),
            TimestampProviderStrategy::MonotonicIncrease => Self::monotonic_from(config.origin),
            TimestampProviderStrategy::Constant => Self::constant(config.constant),
        }
    }

    /// Returns the strategy this provider follows.
    #[must_use]
    pub fn strategy(&self) -> TimestampProviderStrategy {
        match self.source {
            Source::WallClock => TimestampProviderStrategy::WallClock,
            Source::Monotonic(_) => TimestampProviderStrategy::MonotonicIncrease,
            Source::Constant(_) => TimestampProviderStrategy::Constant,
        }
    }

    /// Produces the next timestamp.
    pub fn next_timestamp(&self) -> f64 {
        match &self.source {
            Source::WallClock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs_f64())
                .unwrap_or_default(),
            Source::Monotonic(last) => {
                let previous = last
                    .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                        Some((f64::from_bits(bits) + 1.0).to_bits())
                    })
                    .unwrap_or_else(|bits| bits);
                f64::from_bits(previous) + 1.0
            }
            Source::Constant(value) => *value,
        }
    }
}

impl Default for TimestampProvider {
    fn default() -> Self {
        Self::wall_clock()
    }
}

/// Provider configuration.
///
/// Every field is optional in the source document:
///
/// ```json
/// { "strategy": "monotonic-increase", "origin": 0.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, with = "strategy_name")]
    pub strategy: TimestampProviderStrategy,
    /// Last value a monotonic provider counts from.
    #[serde(default)]
    pub origin: f64,
    /// Value returned by a constant provider.
    #[serde(default)]
    pub constant: f64,
}

impl ProviderConfig {
    /// Parses configuration from a JSON document.
    pub fn from_json_str(contents: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        if !config.origin.is_finite() || !config.constant.is_finite() {
            return Err(crate::Error::InvalidTimestamp(
                "provider origin and constant must be finite".to_string(),
            ));
        }
        Ok(config)
    }

    /// Configuration for a strategy with default origin and constant.
    #[must_use]
    pub fn for_strategy(strategy: TimestampProviderStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            strategy: TimestampProviderStrategy::WallClock,
            origin: 0.0,
            constant: 0.0,
        }
    }
}

mod strategy_name {
    use super::TimestampProviderStrategy;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        strategy: &TimestampProviderStrategy,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(strategy.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<TimestampProviderStrategy, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

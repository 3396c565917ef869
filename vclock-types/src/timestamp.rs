//! Tie-break timestamps.
//!
//! An [`UnambiguousTimestamp`] records which actor last advanced a clock and
//! the provider value at that moment. Ordering is timestamp first, then actor
//! id, so two distinct actors never produce equal timestamps even under a
//! constant or low-resolution provider.

use crate::ActorId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An (actor, timestamp) pair with a strict total order.
///
/// Timestamps compare with [`f64::total_cmp`], so `-0.0 < 0.0` and NaN has a
/// fixed position. Equality and hashing follow the same rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnambiguousTimestamp<A> {
    #[serde(rename = "actorID")]
    actor_id: A,
    timestamp: f64,
}

impl<A> UnambiguousTimestamp<A> {
    /// Creates a timestamp from components.
    #[must_use]
    pub const fn new(actor_id: A, timestamp: f64) -> Self {
        Self {
            actor_id,
            timestamp,
        }
    }

    /// Returns the actor that produced this timestamp.
    #[must_use]
    pub fn actor_id(&self) -> &A {
        &self.actor_id
    }

    /// Returns the provider value.
    #[must_use]
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

impl<A: ActorId> UnambiguousTimestamp<A> {
    /// Returns the greater of two timestamps, cloned.
    #[must_use]
    pub fn max_of(&self, other: &Self) -> Self {
        if other > self {
            other.clone()
        } else {
            self.clone()
        }
    }
}

impl<A: Ord> PartialEq for UnambiguousTimestamp<A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A: Ord> Eq for UnambiguousTimestamp<A> {}

impl<A: Ord> PartialOrd for UnambiguousTimestamp<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: Ord> Ord for UnambiguousTimestamp<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.timestamp.total_cmp(&other.timestamp) {
            Ordering::Equal => self.actor_id.cmp(&other.actor_id),
            other => other,
        }
    }
}

impl<A: Hash> Hash for UnambiguousTimestamp<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.actor_id.hash(state);
        self.timestamp.to_bits().hash(state);
    }
}

impl<A: fmt::Display> fmt::Display for UnambiguousTimestamp<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.2})", self.actor_id, self.timestamp)
    }
}

//! Vector Clock for causality tracking.
//!
//! A vector clock counts, per actor, the events that actor has produced or
//! observed. Comparing two clocks tells whether one happened before the other
//! or whether they are concurrent.
//!
//! Clocks are values: [`VectorClock::incrementing`] and
//! [`VectorClock::merging`] return new clocks and never touch the receiver.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use vclock_types::ActorId;

/// Causality relationship between two vector clocks.
///
/// Identical clocks are reported as [`CausalOrder::Concurrent`]: neither
/// happened before the other. Use [`VectorClock::is_identical`] to tell the
/// two cases apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CausalOrder {
    /// First clock happened before second.
    Before,
    /// First clock happened after second.
    After,
    /// Neither clock happened before the other.
    Concurrent,
}

/// A Vector Clock for tracking causality across actors.
///
/// An actor missing from the map has count 0, so `{A: 1}` and `{A: 1, B: 0}`
/// are the same clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "A: Serialize + ActorId",
    deserialize = "A: Deserialize<'de> + ActorId"
))]
#[serde(transparent)]
pub struct VectorClock<A> {
    /// Map from actor ID to the number of events seen from that actor.
    clocks: HashMap<A, u64>,
}

impl<A: ActorId> VectorClock<A> {
    /// Creates a new empty vector clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clocks: HashMap::new(),
        }
    }

    /// Creates a vector clock with a single actor at count 0.
    #[must_use]
    pub fn for_actor(actor_id: A) -> Self {
        let mut clocks = HashMap::new();
        clocks.insert(actor_id, 0);
        Self { clocks }
    }

    /// Creates a vector clock from raw counts.
    #[must_use]
    pub fn from_counts(clocks: HashMap<A, u64>) -> Self {
        Self { clocks }
    }

    /// Returns the count for an actor (0 if not present).
    #[must_use]
    pub fn get(&self, actor_id: &A) -> u64 {
        self.clocks.get(actor_id).copied().unwrap_or(0)
    }

    /// Returns all actors and their counts, in no particular order.
    pub fn actors(&self) -> impl Iterator<Item = (&A, &u64)> {
        self.clocks.iter()
    }

    /// Returns the raw count map.
    #[must_use]
    pub fn counts(&self) -> &HashMap<A, u64> {
        &self.clocks
    }

    /// Returns the number of actors in the clock, including explicit zeros.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clocks.len()
    }

    /// Returns true if the clock has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clocks.is_empty()
    }

    /// Returns a clock with one more event recorded for `actor_id`.
    #[must_use]
    pub fn incrementing(&self, actor_id: A) -> Self {
        let mut incremented = self.clone();
        let entry = incremented.clocks.entry(actor_id).or_insert(0);
        *entry = entry.saturating_add(1);
        incremented
    }

    /// Returns the element-wise maximum of this clock and another.
    ///
    /// This operation is commutative, associative, and idempotent.
    #[must_use]
    pub fn merging(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (actor_id, &count) in &other.clocks {
            let entry = merged.clocks.entry(actor_id.clone()).or_insert(0);
            if count > *entry {
                *entry = count;
            }
        }
        merged
    }

    /// Compares this clock with another to determine causal ordering.
    ///
    /// Scans the union of both key sets, treating missing actors as 0, and
    /// stops as soon as each side is ahead somewhere.
    #[must_use]
    pub fn partial_order(&self, other: &Self) -> CausalOrder {
        let mut self_greater = false;
        let mut other_greater = false;

        let all_actors: HashSet<&A> = self.clocks.keys().chain(other.clocks.keys()).collect();

        for actor_id in all_actors {
            let self_count = self.get(actor_id);
            let other_count = other.get(actor_id);

            if self_count > other_count {
                self_greater = true;
            }
            if other_count > self_count {
                other_greater = true;
            }
            if self_greater && other_greater {
                return CausalOrder::Concurrent;
            }
        }

        match (self_greater, other_greater) {
            (true, false) => CausalOrder::After,
            (false, true) => CausalOrder::Before,
            _ => CausalOrder::Concurrent,
        }
    }

    /// Returns true if both clocks hold the same counts, ignoring zero entries.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self.clocks
            .iter()
            .all(|(actor_id, &count)| other.get(actor_id) == count)
            && other
                .clocks
                .iter()
                .all(|(actor_id, &count)| self.get(actor_id) == count)
    }

    /// Returns true if this clock is causally before the other.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.partial_order(other) == CausalOrder::Before
    }

    /// Returns true if this clock is causally after the other.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.partial_order(other) == CausalOrder::After
    }

    /// Returns true if neither clock happened before the other.
    #[must_use]
    pub fn is_concurrent(&self, other: &Self) -> bool {
        self.partial_order(other) == CausalOrder::Concurrent
    }

    /// Returns true if this clock dominates the other (is >= for all actors).
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        self.is_after(other) || self.is_identical(other)
    }
}

impl<A: ActorId> Default for VectorClock<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ActorId> PartialEq for VectorClock<A> {
    fn eq(&self, other: &Self) -> bool {
        self.is_identical(other)
    }
}

impl<A: ActorId> Eq for VectorClock<A> {}

impl<A: ActorId + fmt::Display> VectorClock<A> {
    /// Writes `A=1, B=2` with actors in ascending order.
    pub(crate) fn write_counts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.clocks.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for (i, (actor_id, count)) in entries.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{actor_id}={count}")?;
        }
        Ok(())
    }
}

impl<A: ActorId + fmt::Display> fmt::Display for VectorClock<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        self.write_counts(f)?;
        f.write_str(">")
    }
}

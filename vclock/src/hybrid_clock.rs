//! Vector clock with a deterministic total order.
//!
//! A [`HybridClock`] pairs a [`VectorClock`] with an [`UnambiguousTimestamp`]
//! naming the actor that last advanced it. [`HybridClock::total_order`]
//! compares causally ordered clocks by causality and concurrent clocks by the
//! timestamp, so every replica resolves the same pair the same way.
//!
//! The total order is decided pairwise. Any two clocks compare as exactly one
//! of less, equal or greater, but the relation is only transitive over clocks
//! whose timestamps never run against causality: a causally earlier clock must
//! carry a smaller timestamp. Replicas that each advance their own clock
//! (increment, or merge then increment) from one shared monotonic provider
//! satisfy this. Clocks stamped by independent providers may form cycles, so
//! `HybridClock` does not implement [`Ord`].

use crate::vector_clock::{CausalOrder, VectorClock};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::trace;
use vclock_types::{ActorId, TimestampProvider, TimestampProviderStrategy, UnambiguousTimestamp};

/// A vector clock extended with a tie-break timestamp.
///
/// All operations return new values. Clones and derived clocks share the
/// timestamp provider, so a monotonic provider keeps counting across every
/// clock descended from one construction.
#[derive(Debug, Clone)]
pub struct HybridClock<A> {
    clock: VectorClock<A>,
    timestamp: UnambiguousTimestamp<A>,
    provider: TimestampProvider,
}

impl<A: ActorId> HybridClock<A> {
    /// Creates a clock for `actor_id` with a self-entry at 0, stamped from a
    /// fresh provider of the given strategy.
    #[must_use]
    pub fn new(actor_id: A, strategy: TimestampProviderStrategy) -> Self {
        Self::with_provider(actor_id, TimestampProvider::for_strategy(strategy))
    }

    /// Creates a clock for `actor_id` with a self-entry at 0.
    #[must_use]
    pub fn with_provider(actor_id: A, provider: TimestampProvider) -> Self {
        let clock = VectorClock::for_actor(actor_id.clone());
        Self::stamped(clock, actor_id, provider)
    }

    /// Creates a clock with no counter entries, stamped for `actor_id`.
    #[must_use]
    pub fn empty(actor_id: A, provider: TimestampProvider) -> Self {
        Self::stamped(VectorClock::new(), actor_id, provider)
    }

    fn stamped(clock: VectorClock<A>, actor_id: A, provider: TimestampProvider) -> Self {
        let timestamp = UnambiguousTimestamp::new(actor_id, provider.next_timestamp());
        Self {
            clock,
            timestamp,
            provider,
        }
    }

    /// Reassembles a clock from its parts. Used when decoding.
    pub(crate) fn from_parts(
        clock: VectorClock<A>,
        timestamp: UnambiguousTimestamp<A>,
        provider: TimestampProvider,
    ) -> Self {
        Self {
            clock,
            timestamp,
            provider,
        }
    }

    /// Returns the causal counters.
    #[must_use]
    pub fn vector(&self) -> &VectorClock<A> {
        &self.clock
    }

    /// Returns the tie-break timestamp.
    #[must_use]
    pub fn timestamp(&self) -> &UnambiguousTimestamp<A> {
        &self.timestamp
    }

    /// Returns the timestamp provider.
    #[must_use]
    pub fn provider(&self) -> &TimestampProvider {
        &self.provider
    }

    /// Returns the provider strategy.
    #[must_use]
    pub fn strategy(&self) -> TimestampProviderStrategy {
        self.provider.strategy()
    }

    /// Returns the count for an actor (0 if not present).
    #[must_use]
    pub fn get(&self, actor_id: &A) -> u64 {
        self.clock.get(actor_id)
    }

    /// Returns a clock with one more event for `actor_id`, re-stamped with
    /// `actor_id` and the provider's next value.
    #[must_use]
    pub fn incrementing(&self, actor_id: A) -> Self {
        let clock = self.clock.incrementing(actor_id.clone());
        let timestamp = UnambiguousTimestamp::new(actor_id, self.provider.next_timestamp());
        trace!(
            actor = ?timestamp.actor_id(),
            timestamp = timestamp.timestamp(),
            "incremented clock"
        );
        Self {
            clock,
            timestamp,
            provider: self.provider.clone(),
        }
    }

    /// Returns the merge of this clock and another.
    ///
    /// Counters take the element-wise maximum and the timestamp takes the
    /// greater of the two. The receiver's provider is kept.
    #[must_use]
    pub fn merging(&self, other: &Self) -> Self {
        let merged = Self {
            clock: self.clock.merging(&other.clock),
            timestamp: self.timestamp.max_of(&other.timestamp),
            provider: self.provider.clone(),
        };
        trace!(
            actors = merged.clock.len(),
            timestamp = merged.timestamp.timestamp(),
            "merged clocks"
        );
        merged
    }

    /// Compares the causal counters only.
    #[must_use]
    pub fn partial_order(&self, other: &Self) -> CausalOrder {
        self.clock.partial_order(&other.clock)
    }

    /// Compares two clocks under the total order.
    ///
    /// A causal relationship decides the result; concurrent clocks compare by
    /// timestamp, then by the stamping actor. `a.total_order(b)` is always the
    /// reverse of `b.total_order(a)`. See the module docs for when the order
    /// is transitive and therefore safe to hand to `sort_by`.
    #[must_use]
    pub fn total_order(&self, other: &Self) -> Ordering {
        match self.partial_order(other) {
            CausalOrder::Before => Ordering::Less,
            CausalOrder::After => Ordering::Greater,
            CausalOrder::Concurrent => self.timestamp.cmp(&other.timestamp),
        }
    }

    /// Returns true if the clocks are concurrent and carry equal timestamps,
    /// i.e. neither sorts before the other.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.total_order(other) == Ordering::Equal
    }
}

/// Structural equality: same counters (ignoring zero entries), same timestamp
/// and same provider strategy.
///
/// Use [`HybridClock::is_equivalent`] for equality under the total order.
impl<A: ActorId> PartialEq for HybridClock<A> {
    fn eq(&self, other: &Self) -> bool {
        self.clock == other.clock
            && self.timestamp == other.timestamp
            && self.strategy() == other.strategy()
    }
}

impl<A: ActorId> Eq for HybridClock<A> {}

// Structurally equal clocks share a timestamp.
impl<A: ActorId> Hash for HybridClock<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.timestamp.hash(state);
    }
}

impl<A: ActorId + fmt::Display> fmt::Display for HybridClock<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        self.clock.write_counts(f)?;
        write!(f, " | t: {}>", self.timestamp)
    }
}

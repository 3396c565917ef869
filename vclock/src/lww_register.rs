//! Last-Writer-Wins Register (LWW-Register).
//!
//! A register holding a single value versioned by a [`HybridClock`]. A write
//! that causally follows another always wins; concurrent writes are resolved
//! by the clock's timestamp tie-break, so every replica picks the same winner.
//!
//! Use cases:
//! - Single-value fields replicated between actors
//! - Picking one survivor among concurrent writes

use crate::hybrid_clock::HybridClock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use vclock_types::ActorId;

/// A Last-Writer-Wins Register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, A: Serialize + ActorId",
    deserialize = "T: Deserialize<'de>, A: Deserialize<'de> + ActorId"
))]
pub struct LwwRegister<T, A> {
    /// The current value.
    value: T,
    /// Version of the last write.
    clock: HybridClock<A>,
}

impl<T, A: ActorId> LwwRegister<T, A> {
    /// Creates a register holding `value` at version `clock`.
    #[must_use]
    pub fn new(value: T, clock: HybridClock<A>) -> Self {
        Self { value, clock }
    }

    /// Returns a reference to the current value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the version of the last write.
    #[must_use]
    pub fn clock(&self) -> &HybridClock<A> {
        &self.clock
    }

    /// Returns the actor that performed the last write.
    #[must_use]
    pub fn writer(&self) -> &A {
        self.clock.timestamp().actor_id()
    }

    /// Returns a register holding `value`, written by `actor_id` after the
    /// current version.
    #[must_use]
    pub fn set(&self, value: T, actor_id: A) -> Self {
        Self {
            value,
            clock: self.clock.incrementing(actor_id),
        }
    }

    /// Consumes the register, returning its value.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: Clone, A: ActorId> LwwRegister<T, A> {
    /// Creates a new register that is the merge of this and another.
    ///
    /// The write whose clock is greater in the total order wins, value and
    /// clock together. On equivalent clocks the receiver is kept.
    /// - Idempotent: merged(a, a) == a
    /// - Commutative: merged(a, b) == merged(b, a) unless the clocks are equivalent
    /// - Associative only over writes the total order ranks transitively, such
    ///   as replicas writing through one shared monotonic provider
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        match other.clock.total_order(&self.clock) {
            Ordering::Greater => other.clone(),
            Ordering::Less | Ordering::Equal => self.clone(),
        }
    }
}

impl<T: PartialEq, A: ActorId> PartialEq for LwwRegister<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.clock == other.clock
    }
}

impl<T: Eq, A: ActorId> Eq for LwwRegister<T, A> {}

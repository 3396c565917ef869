//! Shared test helpers for clock tests.

#![allow(dead_code)]

use proptest::prelude::*;
use std::collections::HashMap;
use vclock::{HybridClock, TimestampProvider, TimestampProviderStrategy, VectorClock};

pub const ACTORS: [&str; 4] = ["A", "B", "C", "D"];

/// A clock for `actor` on a fresh monotonic provider (first stamp 1.0).
pub fn monotonic(actor: &str) -> HybridClock<String> {
    HybridClock::new(actor.to_string(), TimestampProviderStrategy::MonotonicIncrease)
}

/// A clock for `actor` whose stamps are always 0.0.
pub fn constant(actor: &str) -> HybridClock<String> {
    HybridClock::new(actor.to_string(), TimestampProviderStrategy::Constant)
}

/// Builds a core clock from literal counts.
pub fn counts(entries: &[(&'static str, u64)]) -> VectorClock<&'static str> {
    VectorClock::from_counts(entries.iter().copied().collect::<HashMap<_, _>>())
}

pub fn actor_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(ACTORS.to_vec())
}

/// Core clocks over a small actor set, explicit zeros included.
pub fn vector_clock_strategy() -> impl Strategy<Value = VectorClock<&'static str>> {
    prop::collection::hash_map(actor_strategy(), 0u64..6, 0..ACTORS.len())
        .prop_map(VectorClock::from_counts)
}

/// Hybrid clocks built by replaying increments on a constant provider,
/// stamped with a random value so ties and non-ties both occur.
pub fn hybrid_clock_strategy() -> impl Strategy<Value = HybridClock<&'static str>> {
    (
        actor_strategy(),
        prop::collection::vec(actor_strategy(), 0..8),
        0u8..3,
    )
        .prop_map(|(owner, events, stamp)| {
            let provider = TimestampProvider::constant(f64::from(stamp));
            events
                .into_iter()
                .fold(HybridClock::with_provider(owner, provider), |clock, actor| {
                    clock.incrementing(actor)
                })
        })
}

/// One replica step: `(actor index, Some(sender index))` merges the sender's
/// current clock before incrementing, `None` only increments.
pub type Step = (usize, Option<usize>);

pub fn history_strategy() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        (0..ACTORS.len(), prop::option::of(0..ACTORS.len())),
        0..24,
    )
}

/// Runs `steps` over one replica per actor, each stamping from the provider
/// `provider_for` hands it. Returns every clock the replicas passed through.
pub fn replay(
    steps: &[Step],
    provider_for: impl Fn(usize) -> TimestampProvider,
) -> Vec<HybridClock<&'static str>> {
    let mut replicas: Vec<_> = ACTORS
        .iter()
        .enumerate()
        .map(|(i, actor)| HybridClock::with_provider(*actor, provider_for(i)))
        .collect();
    let mut seen = replicas.clone();

    for &(actor, sender) in steps {
        let received = match sender {
            Some(sender) => replicas[actor].merging(&replicas[sender]),
            None => replicas[actor].clone(),
        };
        replicas[actor] = received.incrementing(ACTORS[actor]);
        seen.push(replicas[actor].clone());
    }
    seen
}

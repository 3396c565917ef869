//! Property-based tests for clock correctness.
//!
//! These tests verify the algebra the rest of the system depends on:
//! - Merge is commutative, associative and idempotent
//! - Incrementing always moves a clock causally forward
//! - A merge is never causally before either input
//! - The total order decides every pair, agrees with causality, and is
//!   transitive for replicas stamping from one shared provider
//! - Encoding then decoding preserves a clock, any finite timestamp, and the
//!   provider sequence

mod common;

use common::{
    actor_strategy, history_strategy, hybrid_clock_strategy, replay, vector_clock_strategy,
};
use proptest::prelude::*;
use std::cmp::Ordering;
use vclock::{CausalOrder, HybridClock, TimestampProvider, decode_json, encode_json};

fn finite_timestamp() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>().prop_filter("finite", |t| t.is_finite()),
        1.5e9..2.0e9f64,
    ]
}

// =============================================================================
// VECTOR CLOCK PROPERTY TESTS
// =============================================================================

mod vector_clock_properties {
    use super::*;

    proptest! {
        /// Commutativity: merge(A, B) == merge(B, A)
        #[test]
        fn merge_is_commutative(a in vector_clock_strategy(), b in vector_clock_strategy()) {
            prop_assert_eq!(a.merging(&b), b.merging(&a));
        }

        /// Associativity: merge(merge(A, B), C) == merge(A, merge(B, C))
        #[test]
        fn merge_is_associative(
            a in vector_clock_strategy(),
            b in vector_clock_strategy(),
            c in vector_clock_strategy(),
        ) {
            prop_assert_eq!(a.merging(&b).merging(&c), a.merging(&b.merging(&c)));
        }

        /// Idempotence: merge(A, A) == A
        #[test]
        fn merge_is_idempotent(a in vector_clock_strategy()) {
            prop_assert_eq!(a.merging(&a), a);
        }

        #[test]
        fn increment_moves_forward(a in vector_clock_strategy(), actor in actor_strategy()) {
            prop_assert_eq!(a.partial_order(&a.incrementing(actor)), CausalOrder::Before);
        }

        #[test]
        fn merge_is_never_before_an_input(
            a in vector_clock_strategy(),
            b in vector_clock_strategy(),
        ) {
            let merged = a.merging(&b);
            prop_assert_ne!(merged.partial_order(&a), CausalOrder::Before);
            prop_assert_ne!(merged.partial_order(&b), CausalOrder::Before);
            prop_assert!(merged.dominates(&a));
            prop_assert!(merged.dominates(&b));
        }

        #[test]
        fn partial_order_is_antisymmetric(
            a in vector_clock_strategy(),
            b in vector_clock_strategy(),
        ) {
            let expected = match a.partial_order(&b) {
                CausalOrder::Before => CausalOrder::After,
                CausalOrder::After => CausalOrder::Before,
                CausalOrder::Concurrent => CausalOrder::Concurrent,
            };
            prop_assert_eq!(b.partial_order(&a), expected);
        }

        #[test]
        fn identical_means_no_causal_distinction(
            a in vector_clock_strategy(),
            b in vector_clock_strategy(),
        ) {
            if a.is_identical(&b) {
                prop_assert_eq!(a.partial_order(&b), CausalOrder::Concurrent);
            }
        }
    }
}

// =============================================================================
// HYBRID CLOCK PROPERTY TESTS
// =============================================================================

mod hybrid_clock_properties {
    use super::*;

    proptest! {
        #[test]
        fn merge_is_commutative(a in hybrid_clock_strategy(), b in hybrid_clock_strategy()) {
            let ab = a.merging(&b);
            let ba = b.merging(&a);
            prop_assert_eq!(ab.vector(), ba.vector());
            prop_assert_eq!(ab.timestamp(), ba.timestamp());
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn merge_is_associative(
            a in hybrid_clock_strategy(),
            b in hybrid_clock_strategy(),
            c in hybrid_clock_strategy(),
        ) {
            prop_assert_eq!(a.merging(&b).merging(&c), a.merging(&b.merging(&c)));
        }

        #[test]
        fn merge_is_idempotent(a in hybrid_clock_strategy()) {
            prop_assert_eq!(a.merging(&a), a);
        }

        /// Exactly one of less, equal, greater holds, mirrored for (b, a).
        #[test]
        fn total_order_trichotomy(a in hybrid_clock_strategy(), b in hybrid_clock_strategy()) {
            let forward = a.total_order(&b);
            prop_assert_eq!(forward, b.total_order(&a).reverse());
            prop_assert_eq!(a.is_equivalent(&b), forward == Ordering::Equal);
        }

        #[test]
        fn total_order_agrees_with_causality(
            a in hybrid_clock_strategy(),
            b in hybrid_clock_strategy(),
        ) {
            match a.partial_order(&b) {
                CausalOrder::Before => prop_assert_eq!(a.total_order(&b), Ordering::Less),
                CausalOrder::After => prop_assert_eq!(a.total_order(&b), Ordering::Greater),
                CausalOrder::Concurrent => {
                    prop_assert_eq!(a.total_order(&b), a.timestamp().cmp(b.timestamp()));
                }
            }
        }

        #[test]
        fn increment_sorts_after(a in hybrid_clock_strategy(), actor in actor_strategy()) {
            let next = a.incrementing(actor);
            prop_assert_eq!(a.partial_order(&next), CausalOrder::Before);
            prop_assert_eq!(a.total_order(&next), Ordering::Less);
            prop_assert_eq!(*next.timestamp().actor_id(), actor);
        }

        /// Replicas sharing one monotonic provider never stamp a causally
        /// earlier clock later, so the order over their history is transitive
        /// and sorting it is safe.
        #[test]
        fn total_order_is_transitive_with_shared_provider(steps in history_strategy()) {
            let shared = TimestampProvider::monotonic();
            let clocks = replay(&steps, |_| shared.clone());

            for a in &clocks {
                for b in &clocks {
                    if a.total_order(b) == Ordering::Greater {
                        continue;
                    }
                    for c in &clocks {
                        if b.total_order(c) != Ordering::Greater {
                            prop_assert_ne!(a.total_order(c), Ordering::Greater);
                        }
                    }
                }
            }

            let mut sorted = clocks.clone();
            sorted.sort_by(HybridClock::total_order);
            for pair in sorted.windows(2) {
                prop_assert_ne!(pair[0].total_order(&pair[1]), Ordering::Greater);
            }
        }

        /// Independent providers can break transitivity, but every pair is
        /// still decided the same way from both sides.
        #[test]
        fn pairwise_order_holds_with_independent_providers(
            steps in history_strategy(),
            origins in prop::collection::vec(0u8..20, common::ACTORS.len()),
        ) {
            let clocks = replay(&steps, |i| TimestampProvider::monotonic_from(f64::from(origins[i])));
            for a in &clocks {
                for b in &clocks {
                    prop_assert_eq!(a.total_order(b), b.total_order(a).reverse());
                    if a.partial_order(b) == CausalOrder::Before {
                        prop_assert_eq!(a.total_order(b), Ordering::Less);
                    }
                }
            }
        }

        #[test]
        fn codec_roundtrip(events in prop::collection::vec(actor_strategy(), 0..10)) {
            let clock = events.iter().fold(
                HybridClock::with_provider("A".to_string(), TimestampProvider::monotonic()),
                |clock, actor| clock.incrementing(actor.to_string()),
            );
            let decoded: HybridClock<String> = decode_json(&encode_json(&clock).unwrap()).unwrap();
            prop_assert_eq!(&decoded, &clock);

            let expected_next = clock.timestamp().timestamp() + 1.0;
            prop_assert_eq!(
                decoded.incrementing("B".to_string()).timestamp().timestamp(),
                expected_next
            );
        }

        #[test]
        fn codec_roundtrip_preserves_any_finite_timestamp(
            stamp in finite_timestamp(),
            events in prop::collection::vec(actor_strategy(), 0..4),
        ) {
            let clock = events.iter().fold(
                HybridClock::with_provider("A".to_string(), TimestampProvider::constant(stamp)),
                |clock, actor| clock.incrementing(actor.to_string()),
            );
            let decoded: HybridClock<String> = decode_json(&encode_json(&clock).unwrap()).unwrap();
            prop_assert_eq!(decoded.timestamp().timestamp().to_bits(), stamp.to_bits());
            prop_assert_eq!(&decoded, &clock);
        }
    }
}

//! Vector clocks with a deterministic total-order extension.
//!
//! This crate provides:
//!
//! - [`VectorClock<A>`] — per-actor event counts and the happened-before
//!   partial order
//! - [`HybridClock<A>`] — a vector clock plus an (actor, timestamp)
//!   tie-breaker deciding every pair under a total order
//! - [`codec`] — the persisted form of a [`HybridClock`]
//! - [`LwwRegister<T, A>`] — last-writer-wins resolution on top of the total order
//!
//! Every clock operation is pure: `incrementing` and `merging` return new
//! values. Merge is:
//! - **Commutative**: merge(a, b) == merge(b, a)
//! - **Associative**: merge(merge(a, b), c) == merge(a, merge(b, c))
//! - **Idempotent**: merge(a, a) == a

pub mod codec;
mod error;
mod hybrid_clock;
mod lww_register;
mod vector_clock;

pub use codec::{ClockState, decode_json, decode_value, encode_json, encode_value};
pub use error::{CodecError, CodecResult};
pub use hybrid_clock::HybridClock;
pub use lww_register::LwwRegister;
pub use vector_clock::{CausalOrder, VectorClock};

pub use vclock_types::{
    ActorId, ProviderConfig, ReplicaId, TimestampProvider, TimestampProviderStrategy,
    UnambiguousTimestamp,
};

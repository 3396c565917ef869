//! Core type definitions for hybrid vector clocks.
//!
//! This crate defines the leaf types the clock crate builds on:
//! - The [`ActorId`] capability bound and a ready-made [`ReplicaId`]
//! - [`UnambiguousTimestamp`], the (actor, timestamp) tie-breaker
//! - [`TimestampProvider`] and its persisted [`TimestampProviderStrategy`]
//! - [`ProviderConfig`] for building providers from configuration

mod ids;
mod provider;
mod timestamp;

pub use ids::{ActorId, ReplicaId};
pub use provider::{ProviderConfig, TimestampProvider, TimestampProviderStrategy};
pub use timestamp::UnambiguousTimestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unknown timestamp provider strategy tag: {0}")]
    UnknownStrategy(u64),

    #[error("unknown timestamp provider strategy name: {0}")]
    InvalidStrategy(String),
}

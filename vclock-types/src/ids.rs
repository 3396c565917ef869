//! Actor identifiers.
//!
//! Clocks are generic over any identifier satisfying [`ActorId`]. [`ReplicaId`]
//! is a UUID v7 identifier for applications without one of their own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use uuid::Uuid;

/// Capabilities a clock needs from an actor identifier.
///
/// Equality and hashing key the counter map; the total order is only ever
/// used to break ties between equal timestamps.
pub trait ActorId: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T> ActorId for T where T: Clone + Eq + Hash + Ord + fmt::Debug {}

/// An actor id for replicas that have no natural name.
///
/// Each replica keeps one counter under its id and stamps its increments with
/// it. The id is also the last tie-break between clocks whose timestamps are
/// equal, and v7 UUIDs make that tie-break favour the replica created later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplicaId(Uuid);

impl ReplicaId {
    /// Mints an id for a new replica.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wraps the UUID a replica already persisted.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses the hyphenated form used as a `clocksByActor` key.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ReplicaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReplicaId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! Persisted form of a [`HybridClock`].
//!
//! ```json
//! {
//!   "clocksByActor": { "A": 1, "B": 2 },
//!   "timestamp": { "actorID": "B", "timestamp": 3.0 },
//!   "timestampProviderStrategy": 1
//! }
//! ```
//!
//! The strategy tag lets a decoded clock rebuild its provider so that a
//! monotonic sequence resumes after the persisted timestamp instead of
//! restarting at its origin.

use crate::error::{CodecError, CodecResult};
use crate::hybrid_clock::HybridClock;
use crate::vector_clock::VectorClock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};
use vclock_types::{ActorId, TimestampProvider, TimestampProviderStrategy, UnambiguousTimestamp};

const CLOCKS_FIELD: &str = "clocksByActor";
const TIMESTAMP_FIELD: &str = "timestamp";
const STRATEGY_FIELD: &str = "timestampProviderStrategy";

/// The logical fields persisted for a clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "A: Serialize + ActorId",
    deserialize = "A: Deserialize<'de> + ActorId"
))]
pub struct ClockState<A> {
    #[serde(rename = "clocksByActor")]
    pub clocks_by_actor: HashMap<A, u64>,
    pub timestamp: UnambiguousTimestamp<A>,
    #[serde(rename = "timestampProviderStrategy")]
    pub timestamp_provider_strategy: TimestampProviderStrategy,
}

impl<A: ActorId> HybridClock<A> {
    /// Captures the persisted fields of this clock.
    #[must_use]
    pub fn to_state(&self) -> ClockState<A> {
        ClockState {
            clocks_by_actor: self.vector().counts().clone(),
            timestamp: self.timestamp().clone(),
            timestamp_provider_strategy: self.strategy(),
        }
    }

    /// Rebuilds a clock from persisted fields, resuming its provider after
    /// the persisted timestamp.
    #[must_use]
    pub fn from_state(state: ClockState<A>) -> Self {
        let provider = TimestampProvider::resume(
            state.timestamp_provider_strategy,
            state.timestamp.timestamp(),
        );
        Self::from_parts(
            VectorClock::from_counts(state.clocks_by_actor),
            state.timestamp,
            provider,
        )
    }
}

impl<A: ActorId> From<ClockState<A>> for HybridClock<A> {
    fn from(state: ClockState<A>) -> Self {
        Self::from_state(state)
    }
}

impl<A: ActorId + Serialize> Serialize for HybridClock<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_state().serialize(serializer)
    }
}

impl<'de, A: ActorId + Deserialize<'de>> Deserialize<'de> for HybridClock<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ClockState::deserialize(deserializer).map(Self::from_state)
    }
}

/// Encodes a clock as a JSON value.
pub fn encode_value<A: ActorId + Serialize>(clock: &HybridClock<A>) -> CodecResult<Value> {
    Ok(serde_json::to_value(clock.to_state())?)
}

/// Encodes a clock as a JSON string.
pub fn encode_json<A: ActorId + Serialize>(clock: &HybridClock<A>) -> CodecResult<String> {
    Ok(serde_json::to_string(&clock.to_state())?)
}

/// Decodes a clock from a JSON string.
pub fn decode_json<A: ActorId + DeserializeOwned>(input: &str) -> CodecResult<HybridClock<A>> {
    let value: Value = serde_json::from_str(input).inspect_err(|e| {
        warn!(error = %e, "rejected encoded clock: malformed json");
    })?;
    decode_value(&value)
}

/// Decodes a clock from a JSON value.
///
/// Every field is required; nothing is defaulted.
pub fn decode_value<A: ActorId + DeserializeOwned>(value: &Value) -> CodecResult<HybridClock<A>> {
    match decode_state(value) {
        Ok(state) => {
            debug!(
                actors = state.clocks_by_actor.len(),
                strategy = %state.timestamp_provider_strategy,
                timestamp = state.timestamp.timestamp(),
                "decoded clock"
            );
            Ok(HybridClock::from_state(state))
        }
        Err(e) => {
            warn!(error = %e, "rejected encoded clock");
            Err(e)
        }
    }
}

fn decode_state<A: ActorId + DeserializeOwned>(value: &Value) -> CodecResult<ClockState<A>> {
    let object = value
        .as_object()
        .ok_or_else(|| CodecError::NotAnObject(json_kind(value)))?;

    let clocks_by_actor = field(object, CLOCKS_FIELD)?;
    let timestamp = field(object, TIMESTAMP_FIELD)?;
    let tag: u64 = field(object, STRATEGY_FIELD)?;
    let timestamp_provider_strategy =
        TimestampProviderStrategy::try_from(tag).map_err(|_| CodecError::UnknownStrategy(tag))?;

    Ok(ClockState {
        clocks_by_actor,
        timestamp,
        timestamp_provider_strategy,
    })
}

fn field<T: DeserializeOwned>(
    object: &serde_json::Map<String, Value>,
    name: &'static str,
) -> CodecResult<T> {
    let value = object.get(name).ok_or(CodecError::MissingField(name))?;
    T::deserialize(value).map_err(|source| CodecError::InvalidField { field: name, source })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

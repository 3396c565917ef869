//! Error types for clock encoding and decoding.

use thiserror::Error;

/// Errors raised while decoding a persisted clock.
///
/// Decoding never falls back to a fresh clock: a default would silently
/// discard causal history.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The document is not a JSON object.
    #[error("encoded clock must be an object, found {0}")]
    NotAnObject(&'static str),

    /// A required field is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field is present but has the wrong shape.
    #[error("invalid field `{field}`: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The strategy tag is not one of the known strategies.
    #[error("unknown timestamp provider strategy tag {0}")]
    UnknownStrategy(u64),

    /// The input is not valid JSON, or the clock could not be rendered as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

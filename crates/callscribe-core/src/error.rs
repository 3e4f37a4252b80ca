//! Domain error types.

use thiserror::Error;

/// Top-level domain error type for call event correlation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    /// An inbound event field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No call record exists for the given call SID.
    #[error("no call with call sid {0} available")]
    NotFound(String),

    /// A transcription event was already recorded for the given call SID.
    #[error("duplicate event for call sid {0}")]
    DuplicateEvent(String),

    /// A conditional update matched no rows after the existence check passed.
    #[error("update had no effect for call sid {0}")]
    NoEffect(String),

    /// The underlying store could not read or durably commit.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
}

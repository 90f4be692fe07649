//! Error types for event store operations.

use round_tracker_persistence::PersistenceError;
use thiserror::Error;

/// Message for a round that does not coerce to a whole number.
pub const ROUND_NOT_A_NUMBER: &str = "round must be a number";
/// Message for a negative round.
pub const ROUND_NEGATIVE: &str = "round must not be negative";
/// Message for a round beyond the representable range.
pub const ROUND_OUT_OF_RANGE: &str = "round is out of range";
/// Message for blank event text.
pub const TEXT_EMPTY: &str = "text must not be empty";
/// Message for a missing context.
pub const DOCUMENT_EMPTY: &str = "document must not be empty";
/// Message for a stored value that is not an event list.
pub const EVENTS_MISSING: &str = "events missing from context";

/// Errors that can occur during event store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Caller supplied a malformed argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// The context holds something that is not an event list.
    #[error("invalid state: {0}")]
    State(String),

    /// Persistence error.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub(crate) fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Returns true for malformed-argument errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true for malformed-context errors.
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State(_))
    }
}

/// Result type alias for event store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

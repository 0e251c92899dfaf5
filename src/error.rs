// Typed errors with thiserror. Surface meaningful messages to JS.
// Domain misses (locked navigation, unmapped identifiers) are not errors; they are silent no-ops.

use thiserror::Error;

/// Story engine error types.
#[derive(Error, Debug, PartialEq)]
pub enum StoryError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown chip group: {0}")]
    UnknownGroup(String),

    #[error("Unknown value `{value}` for chip group `{group}`")]
    UnknownChip { group: String, value: String },

    #[error("A transition is already in flight")]
    TransitionInFlight,

    #[error("Transition mismatch: expected to leave screen {expected}, found {found}")]
    TransitionMismatch { expected: u8, found: u8 },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoryError {
    fn from(err: serde_json::Error) -> Self {
        StoryError::Serialization(err.to_string())
    }
}

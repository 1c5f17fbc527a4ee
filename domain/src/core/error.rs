//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("joker votes must carry 0 points, got {points}")]
    JokerWithPoints { points: u32 },

    #[error("numeric votes must carry at least 1 point")]
    MissingPoints,

    #[error("deck must contain at least one card")]
    EmptyDeck,

    #[error("deck values must be strictly ascending, {next} follows {previous}")]
    UnorderedDeck { previous: u32, next: u32 },

    #[error("deck values must be positive")]
    ZeroCard,
}

impl DomainError {
    /// Whether this error came from validating a submitted vote
    pub fn is_invalid_vote(&self) -> bool {
        matches!(
            self,
            DomainError::JokerWithPoints { .. } | DomainError::MissingPoints
        )
    }
}

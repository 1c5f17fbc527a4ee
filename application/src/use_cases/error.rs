//! Errors surfaced by the estimation use cases

use crate::ports::store::{EntityKind, StoreError};
use poker_domain::{DomainError, IssueId};
use thiserror::Error;

/// Errors that can occur while submitting votes or reading estimates
#[derive(Error, Debug)]
pub enum EstimationError {
    /// The vote payload violates the points / joker rule
    #[error("Invalid vote: {0}")]
    Validation(#[from] DomainError),

    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    /// Finalization kept losing the compare-and-set race; the caller may retry
    /// the whole submission
    #[error("Issue {0} was updated concurrently, retry the submission")]
    ConcurrencyConflict(IssueId),

    #[error(transparent)]
    Store(StoreError),
}

impl EstimationError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, EstimationError::ConcurrencyConflict(_))
    }
}

impl From<StoreError> for EstimationError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { entity, id } => EstimationError::NotFound { entity, id },
            StoreError::Conflict { issue_id, .. } => EstimationError::ConcurrencyConflict(issue_id),
            other => EstimationError::Store(other),
        }
    }
}

//! Estimation parameters for use case behavior control.
//!
//! [`EstimationParams`] groups the static parameters that control how
//! [`SubmitVoteUseCase`](crate::use_cases::submit_vote::SubmitVoteUseCase)
//! evaluates and finalizes issues.

use poker_domain::ConsensusPolicy;
use serde::{Deserialize, Serialize};

/// Default number of internal retries after a finalization conflict
pub const DEFAULT_FINALIZE_RETRIES: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationParams {
    /// Deck and spread threshold
    pub policy: ConsensusPolicy,
    /// How many times evaluate→finalize is retried after a version conflict
    /// before the conflict is surfaced.
    pub finalize_retries: usize,
}

impl Default for EstimationParams {
    fn default() -> Self {
        Self {
            policy: ConsensusPolicy::default(),
            finalize_retries: DEFAULT_FINALIZE_RETRIES,
        }
    }
}

impl EstimationParams {
    // ==================== Builder Methods ====================

    pub fn with_policy(mut self, policy: ConsensusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_finalize_retries(mut self, retries: usize) -> Self {
        self.finalize_retries = retries;
        self
    }
}

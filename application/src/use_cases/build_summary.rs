//! Build Summary use case
//!
//! Read-only aggregate over the votes of one issue. Never finalizes anything.

use crate::ports::store::VoteStore;
use crate::use_cases::error::EstimationError;
use poker_domain::{ConsensusPolicy, EstimateSummary, IssueId};
use std::sync::Arc;

pub struct BuildSummaryUseCase<V: VoteStore + 'static> {
    votes: Arc<V>,
    policy: ConsensusPolicy,
}

impl<V: VoteStore + 'static> BuildSummaryUseCase<V> {
    pub fn new(votes: Arc<V>) -> Self {
        Self {
            votes,
            policy: ConsensusPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ConsensusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Summary of the issue's votes, or `None` if nobody voted yet
    pub async fn execute(&self, issue_id: IssueId) -> Result<Option<EstimateSummary>, EstimationError> {
        let votes = self.votes.votes_for_issue(issue_id).await?;
        Ok(EstimateSummary::from_votes(issue_id, &votes, &self.policy))
    }
}

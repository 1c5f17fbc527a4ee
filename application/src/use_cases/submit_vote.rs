//! Submit Vote use case
//!
//! Records a vote and runs the consensus check for its issue:
//!
//! ```text
//! validate card ─▶ upsert vote ─▶ resolve quorum ─▶ evaluate ─▶ finalize (CAS)
//!                        ▲                                          │
//!                        └──────── restore on failure ◀─────────────┘
//! ```
//!
//! Finalization is a compare-and-set on the issue version. After a lost race
//! the issue is re-read: if the winner finalized it, the vote stands and the
//! verdict is "already estimated". Otherwise the race is retried, and once the
//! retries are spent the vote is reverted and the conflict surfaced.

use crate::config::EstimationParams;
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::event_sink::{EstimationEvent, EstimationEventSink, NoEventSink};
use crate::ports::store::{IssueStore, SessionStore, StoreError, VoteStore};
use crate::use_cases::error::EstimationError;
use poker_domain::{
    Card, Finalization, Issue, IssueId, PendingReason, Quorum, UserId, Verdict, Vote,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for the SubmitVote use case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitVoteInput {
    pub issue_id: IssueId,
    pub user_id: UserId,
    /// Must be 0 for a joker and at least 1 otherwise
    pub points: u32,
    pub is_joker: bool,
}

impl SubmitVoteInput {
    pub fn new(issue_id: IssueId, user_id: UserId, points: u32, is_joker: bool) -> Self {
        Self {
            issue_id,
            user_id,
            points,
            is_joker,
        }
    }

    pub fn points(issue_id: IssueId, user_id: UserId, points: u32) -> Self {
        Self::new(issue_id, user_id, points, false)
    }

    pub fn joker(issue_id: IssueId, user_id: UserId) -> Self {
        Self::new(issue_id, user_id, 0, true)
    }
}

/// Output of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitVoteOutput {
    /// The stored vote
    pub vote: Vote,
    /// Verdict of the evaluation that followed the write
    pub verdict: Verdict,
    /// Set when this submission finalized the issue
    pub finalization: Option<Finalization>,
}

/// Use case for submitting a vote
pub struct SubmitVoteUseCase<V, I, S>
where
    V: VoteStore + 'static,
    I: IssueStore + 'static,
    S: SessionStore + 'static,
{
    votes: Arc<V>,
    issues: Arc<I>,
    sessions: Arc<S>,
    params: EstimationParams,
    events: Arc<dyn EstimationEventSink>,
    clock: Arc<dyn Clock>,
}

impl<V, I, S> SubmitVoteUseCase<V, I, S>
where
    V: VoteStore + 'static,
    I: IssueStore + 'static,
    S: SessionStore + 'static,
{
    pub fn new(votes: Arc<V>, issues: Arc<I>, sessions: Arc<S>) -> Self {
        Self {
            votes,
            issues,
            sessions,
            params: EstimationParams::default(),
            events: Arc::new(NoEventSink),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_params(mut self, params: EstimationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EstimationEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Record a vote, then evaluate and possibly finalize its issue.
    pub async fn execute(&self, input: SubmitVoteInput) -> Result<SubmitVoteOutput, EstimationError> {
        let card = Card::from_parts(input.points, input.is_joker)?;

        // Nothing is written for an unknown issue
        self.issues.get(input.issue_id).await?;

        let write = self
            .votes
            .upsert(input.issue_id, input.user_id, card, self.clock.now())
            .await?;
        debug!(
            "Stored vote {} from user {} on issue {} ({})",
            card,
            input.user_id,
            input.issue_id,
            if write.is_insert() { "new" } else { "updated" }
        );

        let (verdict, finalization) = match self.settle(input.issue_id).await {
            Ok(settled) => settled,
            Err(e) => {
                warn!(
                    "Evaluation of issue {} failed, reverting vote from user {}: {}",
                    input.issue_id, input.user_id, e
                );
                match self.votes.restore(&write).await {
                    Ok(true) => {}
                    Ok(false) => debug!(
                        "Vote from user {} on issue {} was replaced concurrently, kept",
                        input.user_id, input.issue_id
                    ),
                    Err(restore_err) => warn!(
                        "Could not revert vote from user {} on issue {}: {}",
                        input.user_id, input.issue_id, restore_err
                    ),
                }
                return Err(e);
            }
        };

        self.events
            .record(EstimationEvent::vote_recorded(&write.vote, &verdict));
        if let Some(finalization) = &finalization {
            info!(
                "Issue {} finalized at {} points",
                finalization.issue_id, finalization.story_points
            );
            self.events
                .record(EstimationEvent::issue_finalized(finalization));
        }

        Ok(SubmitVoteOutput {
            vote: write.vote,
            verdict,
            finalization,
        })
    }

    /// Evaluate an issue without writing anything.
    pub async fn evaluate(&self, issue_id: IssueId) -> Result<Verdict, EstimationError> {
        let issue = self.issues.get(issue_id).await?;
        Ok(self.verdict_for(&issue).await?)
    }

    async fn verdict_for(&self, issue: &Issue) -> Result<Verdict, StoreError> {
        // Quorum is re-read from the live session on every evaluation
        let session = self.sessions.get(issue.session_id).await?;
        let quorum = Quorum::resolve(&session);
        let votes = self.votes.votes_for_issue(issue.id).await?;
        Ok(self.params.policy.evaluate(issue, &quorum, &votes))
    }

    async fn settle(
        &self,
        issue_id: IssueId,
    ) -> Result<(Verdict, Option<Finalization>), EstimationError> {
        let mut retries = 0;
        loop {
            let issue = self.issues.get(issue_id).await?;
            let verdict = self.verdict_for(&issue).await?;
            debug!("Issue {}: {}", issue_id, verdict);

            let mut updated = issue.clone();
            let Some(finalization) = updated.finalize(&verdict, self.clock.now()) else {
                return Ok((verdict, None));
            };

            match self.issues.save_if_version(updated, issue.version).await {
                Ok(_) => return Ok((verdict, Some(finalization))),
                Err(e) if e.is_conflict() => {
                    // The winner may have counted this vote; it must stay.
                    if self.issues.get(issue_id).await?.is_estimated {
                        debug!("Issue {} was finalized by a concurrent submission", issue_id);
                        return Ok((Verdict::pending(PendingReason::AlreadyEstimated), None));
                    }
                    if retries >= self.params.finalize_retries {
                        return Err(e.into());
                    }
                    retries += 1;
                    warn!("Finalization of issue {} lost a race, retrying: {}", issue_id, e);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

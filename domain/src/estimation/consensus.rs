//! Consensus evaluation
//!
//! Given an issue, its session's quorum and every vote cast on it, decide
//! whether the estimate is settled and which denomination it settles on.

use super::card::Deck;
use super::quorum::Quorum;
use super::vote::Vote;
use crate::issue::Issue;
use serde::{Deserialize, Serialize};

/// Default maximum distance between the lowest and highest numeric vote
pub const DEFAULT_MAX_SPREAD: u32 = 2;

/// Why a verdict was not reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingReason {
    /// The issue was finalized earlier; the latch is closed
    AlreadyEstimated,
    /// The session has neither estimators nor participants
    NoQuorum,
    /// Fewer votes than the quorum size
    AwaitingVotes { cast: usize, required: usize },
    /// Every vote is a joker
    OnlyJokers,
    /// Numeric votes are too far apart
    TooWide { spread: u32 },
}

impl std::fmt::Display for PendingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PendingReason::AlreadyEstimated => write!(f, "already estimated"),
            PendingReason::NoQuorum => write!(f, "no estimators or participants"),
            PendingReason::AwaitingVotes { cast, required } => {
                write!(f, "awaiting votes ({}/{})", cast, required)
            }
            PendingReason::OnlyJokers => write!(f, "only joker votes"),
            PendingReason::TooWide { spread } => write!(f, "spread of {} points", spread),
        }
    }
}

/// Outcome of evaluating an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Consensus reached; the issue should be finalized with `final_points`
    Reached { final_points: u32 },
    /// No consensus (yet)
    NotReached { reason: PendingReason },
}

impl Verdict {
    pub fn pending(reason: PendingReason) -> Self {
        Verdict::NotReached { reason }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Verdict::Reached { .. })
    }

    pub fn final_points(&self) -> Option<u32> {
        match self {
            Verdict::Reached { final_points } => Some(*final_points),
            Verdict::NotReached { .. } => None,
        }
    }

    pub fn pending_reason(&self) -> Option<PendingReason> {
        match self {
            Verdict::Reached { .. } => None,
            Verdict::NotReached { reason } => Some(*reason),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Reached { final_points } => write!(f, "reached ({} points)", final_points),
            Verdict::NotReached { reason } => write!(f, "not reached: {}", reason),
        }
    }
}

/// Rules for deciding consensus
///
/// # Example
///
/// ```
/// use poker_domain::estimation::ConsensusPolicy;
///
/// let policy = ConsensusPolicy::default();
/// assert!(policy.is_within_spread(2, 4));
/// assert!(!policy.is_within_spread(1, 8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusPolicy {
    /// Denominations a reached estimate snaps to
    pub deck: Deck,
    /// Largest allowed `max - min` among numeric votes
    pub max_spread: u32,
}

impl Default for ConsensusPolicy {
    fn default() -> Self {
        Self {
            deck: Deck::default(),
            max_spread: DEFAULT_MAX_SPREAD,
        }
    }
}

impl ConsensusPolicy {
    pub fn new(deck: Deck, max_spread: u32) -> Self {
        Self { deck, max_spread }
    }

    pub fn is_within_spread(&self, min: u32, max: u32) -> bool {
        max.saturating_sub(min) <= self.max_spread
    }

    /// Evaluate `votes` (all votes cast on `issue`) against `quorum`.
    ///
    /// Steps, in order: latch check, empty quorum, vote count against quorum
    /// size (jokers included), at least one numeric vote, spread, then the
    /// mean snapped to the nearest deck value.
    pub fn evaluate(&self, issue: &Issue, quorum: &Quorum, votes: &[Vote]) -> Verdict {
        if issue.is_estimated {
            return Verdict::pending(PendingReason::AlreadyEstimated);
        }
        if quorum.is_empty() {
            return Verdict::pending(PendingReason::NoQuorum);
        }
        if !quorum.is_met_by(votes.len()) {
            return Verdict::pending(PendingReason::AwaitingVotes {
                cast: votes.len(),
                required: quorum.size(),
            });
        }

        let valid: Vec<u32> = votes.iter().filter_map(Vote::numeric_points).collect();
        let (Some(&min), Some(&max)) = (valid.iter().min(), valid.iter().max()) else {
            return Verdict::pending(PendingReason::OnlyJokers);
        };

        if !self.is_within_spread(min, max) {
            return Verdict::pending(PendingReason::TooWide { spread: max - min });
        }

        let average = mean(&valid);
        Verdict::Reached {
            final_points: self.deck.nearest(average),
        }
    }
}

/// Arithmetic mean; callers guarantee `values` is non-empty
pub(crate) fn mean(values: &[u32]) -> f64 {
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    sum as f64 / values.len() as f64
}

//! Read-side estimate summary
//!
//! The summary is computed from votes alone. It never consults or mutates the
//! issue, so it can disagree with `is_estimated` (e.g. a joker arriving after
//! the issue was finalized still shows up in the totals).

use super::card::Card;
use super::consensus::{ConsensusPolicy, mean};
use super::vote::Vote;
use crate::core::ids::{IssueId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate view of the votes on one issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub issue_id: IssueId,
    /// All votes, jokers included
    pub total_estimates: usize,
    /// Non-joker votes
    pub valid_estimates: usize,
    pub joker_count: usize,
    /// Lowest numeric vote, 0 if there is none
    pub min_points: u32,
    /// Highest numeric vote, 0 if there is none
    pub max_points: u32,
    /// Mean of numeric votes, 0.0 if there is none
    pub avg_points: f64,
    /// Numeric votes lie within the policy's spread; false without numeric votes
    pub is_consensus: bool,
    /// Card played by each voter
    pub estimates: BTreeMap<UserId, Card>,
}

impl EstimateSummary {
    /// Build the summary, or `None` when nobody has voted.
    pub fn from_votes(issue_id: IssueId, votes: &[Vote], policy: &ConsensusPolicy) -> Option<Self> {
        if votes.is_empty() {
            return None;
        }

        let valid: Vec<u32> = votes.iter().filter_map(Vote::numeric_points).collect();
        let estimates = votes.iter().map(|v| (v.user_id, v.card())).collect();

        let (min_points, max_points, avg_points, is_consensus) =
            match (valid.iter().min(), valid.iter().max()) {
                (Some(&min), Some(&max)) => {
                    (min, max, mean(&valid), policy.is_within_spread(min, max))
                }
                _ => (0, 0, 0.0, false),
            };

        Some(Self {
            issue_id,
            total_estimates: votes.len(),
            valid_estimates: valid.len(),
            joker_count: votes.len() - valid.len(),
            min_points,
            max_points,
            avg_points,
            is_consensus,
            estimates,
        })
    }

    /// Spread between highest and lowest numeric vote
    pub fn spread(&self) -> u32 {
        self.max_points - self.min_points
    }

    pub fn has_numeric_votes(&self) -> bool {
        self.valid_estimates > 0
    }
}

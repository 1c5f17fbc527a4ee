//! Vote entity
//!
//! One vote exists per (issue, user) pair. Resubmitting overwrites the card and
//! refreshes `updated_at`; earlier values are not retained on the entity.

use super::card::Card;
use crate::core::ids::{IssueId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user's vote on an issue
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use poker_domain::estimation::{Card, Vote};
/// use poker_domain::{IssueId, UserId};
///
/// let vote = Vote::new(IssueId::new(1), UserId::new(7), Card::Points(4), Utc::now());
/// assert_eq!(vote.points, 4);
/// assert!(!vote.is_joker);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub issue_id: IssueId,
    pub user_id: UserId,
    /// Story points; always 0 for a joker
    pub points: u32,
    /// "Cannot estimate"
    pub is_joker: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Create a fresh vote with `created_at == updated_at == now`
    pub fn new(issue_id: IssueId, user_id: UserId, card: Card, now: DateTime<Utc>) -> Self {
        Self {
            issue_id,
            user_id,
            points: card.points(),
            is_joker: card.is_joker(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the card in place, keeping `created_at`
    pub fn replace_card(&mut self, card: Card, now: DateTime<Utc>) {
        self.points = card.points();
        self.is_joker = card.is_joker();
        self.updated_at = now;
    }

    pub fn card(&self) -> Card {
        if self.is_joker {
            Card::Joker
        } else {
            Card::Points(self.points)
        }
    }

    /// Numeric points, or `None` for a joker
    pub fn numeric_points(&self) -> Option<u32> {
        (!self.is_joker).then_some(self.points)
    }
}

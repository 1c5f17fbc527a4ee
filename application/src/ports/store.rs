//! Storage ports
//!
//! Persistence for votes, issues and sessions lives behind these traits.
//! Adapters (in-memory, relational, ...) live in the infrastructure layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poker_domain::{
    Card, Issue, IssueId, MembershipChange, NewIssue, NewSession, Session, SessionId, UserId,
    Vote,
};
use std::collections::BTreeSet;
use thiserror::Error;

/// Kind of record a [`StoreError::NotFound`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Issue,
    Session,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Issue => write!(f, "Issue"),
            EntityKind::Session => write!(f, "Session"),
        }
    }
}

/// Errors that can occur in a storage adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    #[error("Issue {issue_id} changed concurrently (expected version {expected}, found {found})")]
    Conflict {
        issue_id: IssueId,
        expected: u64,
        found: u64,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn issue_not_found(id: IssueId) -> Self {
        StoreError::NotFound {
            entity: EntityKind::Issue,
            id: id.get(),
        }
    }

    pub fn session_not_found(id: SessionId) -> Self {
        StoreError::NotFound {
            entity: EntityKind::Session,
            id: id.get(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Result of an upsert: the stored vote and the one it replaced, if any
#[derive(Debug, Clone, PartialEq)]
pub struct VoteWrite {
    pub vote: Vote,
    pub previous: Option<Vote>,
}

impl VoteWrite {
    pub fn is_insert(&self) -> bool {
        self.previous.is_none()
    }
}

/// Filter for [`VoteStore::find`]; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteFilter {
    pub issues: Option<BTreeSet<IssueId>>,
    pub user: Option<UserId>,
}

impl VoteFilter {
    pub fn matches(&self, vote: &Vote) -> bool {
        self.issues
            .as_ref()
            .is_none_or(|issues| issues.contains(&vote.issue_id))
            && self.user.is_none_or(|user| user == vote.user_id)
    }
}

/// Vote persistence
///
/// At most one vote exists per (issue, user).
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Insert or overwrite the vote of `user_id` on `issue_id`.
    ///
    /// A new vote gets `created_at = updated_at = now`; an existing one keeps
    /// `created_at` and has `updated_at` set to `now`.
    async fn upsert(
        &self,
        issue_id: IssueId,
        user_id: UserId,
        card: Card,
        now: DateTime<Utc>,
    ) -> Result<VoteWrite, StoreError>;

    /// Undo `write`: put back `write.previous` (or remove the vote when it
    /// was an insert), but only while the stored row still equals
    /// `write.vote`. A newer overwrite is left alone.
    ///
    /// Returns whether anything was reverted.
    async fn restore(&self, write: &VoteWrite) -> Result<bool, StoreError>;

    /// All votes on an issue
    async fn votes_for_issue(&self, issue_id: IssueId) -> Result<Vec<Vote>, StoreError>;

    /// Votes matching `filter`, in insertion order
    async fn find(&self, filter: &VoteFilter) -> Result<Vec<Vote>, StoreError>;
}

/// Issue persistence
#[async_trait]
pub trait IssueStore: Send + Sync {
    async fn insert(&self, new: NewIssue, now: DateTime<Utc>) -> Result<Issue, StoreError>;

    async fn get(&self, id: IssueId) -> Result<Issue, StoreError>;

    async fn for_session(&self, session_id: SessionId) -> Result<Vec<Issue>, StoreError>;

    /// Store `issue` only if the stored version still equals
    /// `expected_version`; the stored version is then incremented.
    ///
    /// Fails with [`StoreError::Conflict`] otherwise.
    async fn save_if_version(
        &self,
        issue: Issue,
        expected_version: u64,
    ) -> Result<Issue, StoreError>;
}

/// Session and membership persistence
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, new: NewSession, now: DateTime<Utc>) -> Result<Session, StoreError>;

    /// Current snapshot of a session
    async fn get(&self, id: SessionId) -> Result<Session, StoreError>;

    /// Apply `change` atomically; returns the updated session and whether
    /// anything changed.
    async fn apply(
        &self,
        id: SessionId,
        change: MembershipChange,
        now: DateTime<Utc>,
    ) -> Result<(Session, bool), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(issue: u64, user: u64) -> Vote {
        Vote::new(
            IssueId::new(issue),
            UserId::new(user),
            Card::Points(2),
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(VoteFilter::default().matches(&vote(1, 1)));
    }

    #[test]
    fn test_filter_by_issue_and_user() {
        let filter = VoteFilter {
            issues: Some([IssueId::new(1), IssueId::new(2)].into()),
            user: Some(UserId::new(5)),
        };
        assert!(filter.matches(&vote(2, 5)));
        assert!(!filter.matches(&vote(3, 5)));
        assert!(!filter.matches(&vote(1, 6)));
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::issue_not_found(IssueId::new(9)).to_string(),
            "Issue 9 not found"
        );
        assert_eq!(
            StoreError::session_not_found(SessionId::new(2)).to_string(),
            "Session 2 not found"
        );
        assert!(
            StoreError::Conflict {
                issue_id: IssueId::new(1),
                expected: 0,
                found: 1
            }
            .is_conflict()
        );
    }
}

//! Vote listing and history
//!
//! Paginated read access to stored votes, filtered by session, issue or user.

use crate::ports::store::{IssueStore, VoteFilter, VoteStore};
use crate::use_cases::error::EstimationError;
use poker_domain::{IssueId, SessionId, UserId, Vote};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Default page size for [`ListVotesQuery`]
pub const DEFAULT_LIST_LIMIT: usize = 100;
/// Default page size for [`VoteHistoryQuery`]
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Votes filtered by session and/or issue, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListVotesQuery {
    pub session_id: Option<SessionId>,
    pub issue_id: Option<IssueId>,
    pub skip: usize,
    pub limit: usize,
}

impl Default for ListVotesQuery {
    fn default() -> Self {
        Self {
            session_id: None,
            issue_id: None,
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// Votes filtered by issue and/or user, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteHistoryQuery {
    pub issue_id: Option<IssueId>,
    pub user_id: Option<UserId>,
    pub skip: usize,
    pub limit: usize,
}

impl Default for VoteHistoryQuery {
    fn default() -> Self {
        Self {
            issue_id: None,
            user_id: None,
            skip: 0,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

pub struct VoteQueryUseCase<V, I>
where
    V: VoteStore + 'static,
    I: IssueStore + 'static,
{
    votes: Arc<V>,
    issues: Arc<I>,
}

impl<V, I> VoteQueryUseCase<V, I>
where
    V: VoteStore + 'static,
    I: IssueStore + 'static,
{
    pub fn new(votes: Arc<V>, issues: Arc<I>) -> Self {
        Self { votes, issues }
    }

    pub async fn list(&self, query: &ListVotesQuery) -> Result<Vec<Vote>, EstimationError> {
        let mut issues: Option<BTreeSet<IssueId>> = None;

        if let Some(session_id) = query.session_id {
            let in_session = self.issues.for_session(session_id).await?;
            issues = Some(in_session.into_iter().map(|i| i.id).collect());
        }
        if let Some(issue_id) = query.issue_id {
            issues = Some(match issues {
                Some(set) => set.into_iter().filter(|id| *id == issue_id).collect(),
                None => BTreeSet::from([issue_id]),
            });
        }

        let votes = self.votes.find(&VoteFilter { issues, user: None }).await?;
        Ok(votes.into_iter().skip(query.skip).take(query.limit).collect())
    }

    pub async fn history(&self, query: &VoteHistoryQuery) -> Result<Vec<Vote>, EstimationError> {
        let filter = VoteFilter {
            issues: query.issue_id.map(|id| BTreeSet::from([id])),
            user: query.user_id,
        };

        let mut votes = self.votes.find(&filter).await?;
        // Stable sort keeps insertion order among equal timestamps
        votes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(votes.into_iter().skip(query.skip).take(query.limit).collect())
    }
}

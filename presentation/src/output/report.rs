//! Replay report model shared by the formatters

use poker_domain::{EstimateSummary, Issue, Session, UserId, Verdict};
use serde::Serialize;

/// State of one issue after the replay
#[derive(Debug, Clone, Serialize)]
pub struct IssueReport {
    pub issue: Issue,
    /// Read-only evaluation at report time
    pub verdict: Verdict,
    /// `None` when nobody voted
    pub summary: Option<EstimateSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session: Session,
    pub issues: Vec<IssueReport>,
}

/// A scenario vote the engine refused
#[derive(Debug, Clone, Serialize)]
pub struct RejectedVote {
    /// 1-based position in the scenario's vote list
    pub index: usize,
    pub issue_key: String,
    pub user_id: UserId,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    pub sessions: Vec<SessionReport>,
    pub votes_replayed: usize,
    pub rejected: Vec<RejectedVote>,
}

impl ReplayReport {
    pub fn issues(&self) -> impl Iterator<Item = &IssueReport> {
        self.sessions.iter().flat_map(|s| s.issues.iter())
    }

    pub fn estimated_count(&self) -> usize {
        self.issues().filter(|r| r.issue.is_estimated).count()
    }
}

//! In-process port implementations shared by the use case tests

use crate::ports::clock::Clock;
use crate::ports::event_sink::{EstimationEvent, EstimationEventSink};
use crate::ports::store::{IssueStore, SessionStore, StoreError, VoteFilter, VoteStore, VoteWrite};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use poker_domain::{
    Card, Issue, IssueId, MembershipChange, NewIssue, NewSession, Session, SessionId, UserId,
    Vote,
};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, AtomicUsize, Ordering};

#[derive(Default)]
pub(crate) struct MemoryVotes {
    votes: Mutex<Vec<Vote>>,
}

impl MemoryVotes {
    pub(crate) fn all(&self) -> Vec<Vote> {
        self.votes.lock().unwrap().clone()
    }
}

#[async_trait]
impl VoteStore for MemoryVotes {
    async fn upsert(
        &self,
        issue_id: IssueId,
        user_id: UserId,
        card: Card,
        now: DateTime<Utc>,
    ) -> Result<VoteWrite, StoreError> {
        let mut votes = self.votes.lock().unwrap();
        if let Some(existing) = votes
            .iter_mut()
            .find(|v| v.issue_id == issue_id && v.user_id == user_id)
        {
            let previous = existing.clone();
            existing.replace_card(card, now);
            return Ok(VoteWrite {
                vote: existing.clone(),
                previous: Some(previous),
            });
        }
        let vote = Vote::new(issue_id, user_id, card, now);
        votes.push(vote.clone());
        Ok(VoteWrite {
            vote,
            previous: None,
        })
    }

    async fn restore(&self, write: &VoteWrite) -> Result<bool, StoreError> {
        let mut votes = self.votes.lock().unwrap();
        let Some(i) = votes.iter().position(|v| *v == write.vote) else {
            return Ok(false);
        };
        match &write.previous {
            Some(previous) => votes[i] = previous.clone(),
            None => {
                votes.remove(i);
            }
        }
        Ok(true)
    }

    async fn votes_for_issue(&self, issue_id: IssueId) -> Result<Vec<Vote>, StoreError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|v| v.issue_id == issue_id)
            .collect())
    }

    async fn find(&self, filter: &VoteFilter) -> Result<Vec<Vote>, StoreError> {
        Ok(self.all().into_iter().filter(|v| filter.matches(v)).collect())
    }
}

#[derive(Default)]
pub(crate) struct MemoryIssues {
    issues: Mutex<BTreeMap<IssueId, Issue>>,
    next_id: AtomicU64,
    pending_conflicts: AtomicUsize,
}

impl MemoryIssues {
    /// Make the next `n` compare-and-set calls fail
    pub(crate) fn inject_conflicts(&self, n: usize) {
        self.pending_conflicts.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl IssueStore for MemoryIssues {
    async fn insert(&self, new: NewIssue, now: DateTime<Utc>) -> Result<Issue, StoreError> {
        let id = IssueId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let issue = Issue::register(id, new, now);
        self.issues.lock().unwrap().insert(id, issue.clone());
        Ok(issue)
    }

    async fn get(&self, id: IssueId) -> Result<Issue, StoreError> {
        self.issues
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::issue_not_found(id))
    }

    async fn for_session(&self, session_id: SessionId) -> Result<Vec<Issue>, StoreError> {
        Ok(self
            .issues
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn save_if_version(
        &self,
        mut issue: Issue,
        expected_version: u64,
    ) -> Result<Issue, StoreError> {
        let mut issues = self.issues.lock().unwrap();
        let stored = issues
            .get_mut(&issue.id)
            .ok_or(StoreError::issue_not_found(issue.id))?;

        let injected = self
            .pending_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected || stored.version != expected_version {
            return Err(StoreError::Conflict {
                issue_id: issue.id,
                expected: expected_version,
                found: stored.version,
            });
        }

        issue.version = expected_version + 1;
        *stored = issue.clone();
        Ok(issue)
    }
}

/// Issue store where another submitter finalizes the issue right before the
/// first compare-and-set, which then loses.
#[derive(Default)]
pub(crate) struct RacingIssues {
    pub(crate) inner: MemoryIssues,
    raced: AtomicBool,
}

#[async_trait]
impl IssueStore for RacingIssues {
    async fn insert(&self, new: NewIssue, now: DateTime<Utc>) -> Result<Issue, StoreError> {
        self.inner.insert(new, now).await
    }

    async fn get(&self, id: IssueId) -> Result<Issue, StoreError> {
        self.inner.get(id).await
    }

    async fn for_session(&self, session_id: SessionId) -> Result<Vec<Issue>, StoreError> {
        self.inner.for_session(session_id).await
    }

    async fn save_if_version(
        &self,
        issue: Issue,
        expected_version: u64,
    ) -> Result<Issue, StoreError> {
        if self.raced.swap(true, Ordering::SeqCst) {
            return self.inner.save_if_version(issue, expected_version).await;
        }
        let id = issue.id;
        let winner = self.inner.save_if_version(issue, expected_version).await?;
        Err(StoreError::Conflict {
            issue_id: id,
            expected: expected_version,
            found: winner.version,
        })
    }
}

#[derive(Default)]
pub(crate) struct MemorySessions {
    sessions: Mutex<BTreeMap<SessionId, Session>>,
    next_id: AtomicU64,
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn insert(&self, new: NewSession, now: DateTime<Utc>) -> Result<Session, StoreError> {
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let session = Session::open(id, new, now);
        self.sessions.lock().unwrap().insert(id, session.clone());
        Ok(session)
    }

    async fn get(&self, id: SessionId) -> Result<Session, StoreError> {
        self.sessions
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::session_not_found(id))
    }

    async fn apply(
        &self,
        id: SessionId,
        change: MembershipChange,
        now: DateTime<Utc>,
    ) -> Result<(Session, bool), StoreError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get_mut(&id)
            .ok_or(StoreError::session_not_found(id))?;
        let changed = session.apply(&change, now);
        Ok((session.clone(), changed))
    }
}

/// Advances one second per reading
pub(crate) struct StepClock {
    ticks: AtomicI64,
}

impl StepClock {
    pub(crate) fn new() -> Self {
        Self {
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap() + Duration::seconds(tick)
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<EstimationEvent>>,
}

impl RecordingSink {
    pub(crate) fn count(&self, event_type: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}

impl EstimationEventSink for RecordingSink {
    fn record(&self, event: EstimationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

//! In-memory issue store with versioned compare-and-set

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poker_application::{IssueStore, StoreError};
use poker_domain::{Issue, IssueId, NewIssue, SessionId};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
pub struct InMemoryIssueStore {
    issues: RwLock<BTreeMap<IssueId, Issue>>,
    next_id: AtomicU64,
}

impl InMemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IssueStore for InMemoryIssueStore {
    async fn insert(&self, new: NewIssue, now: DateTime<Utc>) -> Result<Issue, StoreError> {
        let id = IssueId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let issue = Issue::register(id, new, now);
        self.issues.write().await.insert(id, issue.clone());
        Ok(issue)
    }

    async fn get(&self, id: IssueId) -> Result<Issue, StoreError> {
        self.issues
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::issue_not_found(id))
    }

    async fn for_session(&self, session_id: SessionId) -> Result<Vec<Issue>, StoreError> {
        Ok(self
            .issues
            .read()
            .await
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
        let mut issues = self.issues.write().await;
        let stored = issues
            .get_mut(&issue.id)
            .ok_or_else(|| StoreError::issue_not_found(issue.id))?;

        if stored.version != expected_version {
            debug!(
                "Rejecting write to issue {}: version {} != expected {}",
                issue.id, stored.version, expected_version
            );
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

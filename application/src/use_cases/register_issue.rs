//! Register Issue use case
//!
//! Adds tracker issues to an existing session.

use crate::ports::clock::{Clock, SystemClock};
use crate::ports::store::{IssueStore, SessionStore};
use crate::use_cases::error::EstimationError;
use poker_domain::{Issue, IssueId, NewIssue, SessionId};
use std::sync::Arc;
use tracing::info;

pub struct RegisterIssueUseCase<I, S>
where
    I: IssueStore + 'static,
    S: SessionStore + 'static,
{
    issues: Arc<I>,
    sessions: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<I, S> RegisterIssueUseCase<I, S>
where
    I: IssueStore + 'static,
    S: SessionStore + 'static,
{
    pub fn new(issues: Arc<I>, sessions: Arc<S>) -> Self {
        Self {
            issues,
            sessions,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register an unestimated issue; the session must exist.
    pub async fn register(&self, new: NewIssue) -> Result<Issue, EstimationError> {
        self.sessions.get(new.session_id).await?;
        let issue = self.issues.insert(new, self.clock.now()).await?;
        info!(
            "Registered issue {} ({}) in session {}",
            issue.id, issue.key, issue.session_id
        );
        Ok(issue)
    }

    pub async fn get(&self, id: IssueId) -> Result<Issue, EstimationError> {
        Ok(self.issues.get(id).await?)
    }

    pub async fn list(&self, session_id: SessionId) -> Result<Vec<Issue>, EstimationError> {
        Ok(self.issues.for_session(session_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::store::SessionStore;
    use crate::use_cases::test_support::{MemoryIssues, MemorySessions};
    use chrono::Utc;
    use poker_domain::NewSession;

    #[tokio::test]
    async fn test_register_and_list() {
        let sessions = Arc::new(MemorySessions::default());
        let session = sessions
            .insert(NewSession::new("Sprint"), Utc::now())
            .await
            .unwrap();
        let use_case = RegisterIssueUseCase::new(Arc::new(MemoryIssues::default()), sessions);

        let issue = use_case
            .register(
                NewIssue::new(session.id, "PROJ-7", "Export CSV")
                    .with_url("https://tracker.example.com/browse/PROJ-7"),
            )
            .await
            .unwrap();

        assert!(!issue.is_estimated);
        assert_eq!(use_case.get(issue.id).await.unwrap().key, "PROJ-7");
        assert_eq!(use_case.list(session.id).await.unwrap().len(), 1);
        assert!(use_case.list(SessionId::new(99)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_requires_session() {
        let use_case = RegisterIssueUseCase::new(
            Arc::new(MemoryIssues::default()),
            Arc::new(MemorySessions::default()),
        );

        let err = use_case
            .register(NewIssue::new(SessionId::new(3), "PROJ-1", "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, EstimationError::NotFound { id: 3, .. }));
    }
}

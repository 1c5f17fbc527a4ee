//! Manage Session use case
//!
//! Opens sessions and applies membership / lifecycle changes. Membership
//! changes never re-run consensus on issues that already have votes; the new
//! quorum only matters from the next vote onward.

use crate::ports::clock::{Clock, SystemClock};
use crate::ports::event_sink::{EstimationEvent, EstimationEventSink, NoEventSink};
use crate::ports::store::SessionStore;
use crate::use_cases::error::EstimationError;
use poker_domain::{MembershipChange, NewSession, Session, SessionId, UserId};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ManageSessionUseCase<S: SessionStore + 'static> {
    sessions: Arc<S>,
    events: Arc<dyn EstimationEventSink>,
    clock: Arc<dyn Clock>,
}

impl<S: SessionStore + 'static> ManageSessionUseCase<S> {
    pub fn new(sessions: Arc<S>) -> Self {
        Self {
            sessions,
            events: Arc::new(NoEventSink),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EstimationEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn open(&self, new: NewSession) -> Result<Session, EstimationError> {
        let session = self.sessions.insert(new, self.clock.now()).await?;
        info!(
            "Opened session {} '{}' ({} participants, {} estimators)",
            session.id,
            session.name,
            session.participants.len(),
            session.estimators.len()
        );
        Ok(session)
    }

    pub async fn get(&self, id: SessionId) -> Result<Session, EstimationError> {
        Ok(self.sessions.get(id).await?)
    }

    /// Apply a change; repeating a change is a no-op and records no event.
    pub async fn apply(
        &self,
        id: SessionId,
        change: MembershipChange,
    ) -> Result<Session, EstimationError> {
        let (session, changed) = self.sessions.apply(id, change, self.clock.now()).await?;
        if changed {
            debug!("Session {}: {}", id, change);
            self.events
                .record(EstimationEvent::session_changed(&session, &change));
        }
        Ok(session)
    }

    pub async fn add_participant(&self, id: SessionId, user: UserId) -> Result<Session, EstimationError> {
        self.apply(id, MembershipChange::AddParticipant(user)).await
    }

    pub async fn remove_participant(
        &self,
        id: SessionId,
        user: UserId,
    ) -> Result<Session, EstimationError> {
        self.apply(id, MembershipChange::RemoveParticipant(user)).await
    }

    pub async fn assign_estimator(&self, id: SessionId, user: UserId) -> Result<Session, EstimationError> {
        self.apply(id, MembershipChange::AssignEstimator(user)).await
    }

    pub async fn unassign_estimator(
        &self,
        id: SessionId,
        user: UserId,
    ) -> Result<Session, EstimationError> {
        self.apply(id, MembershipChange::UnassignEstimator(user)).await
    }

    pub async fn close(&self, id: SessionId) -> Result<Session, EstimationError> {
        self.apply(id, MembershipChange::Close).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MemorySessions, RecordingSink, StepClock};
    use poker_domain::{Quorum, QuorumSource, SessionStatus};

    fn use_case() -> (ManageSessionUseCase<MemorySessions>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let use_case = ManageSessionUseCase::new(Arc::new(MemorySessions::default()))
            .with_events(sink.clone())
            .with_clock(Arc::new(StepClock::new()));
        (use_case, sink)
    }

    #[tokio::test]
    async fn test_membership_changes_drive_quorum() {
        let (use_case, _) = use_case();
        let session = use_case
            .open(NewSession::new("Sprint").with_participants([UserId::new(1), UserId::new(2)]))
            .await
            .unwrap();
        assert_eq!(Quorum::resolve(&session).source, QuorumSource::Participants);

        let session = use_case
            .assign_estimator(session.id, UserId::new(2))
            .await
            .unwrap();
        let quorum = Quorum::resolve(&session);
        assert_eq!(quorum.source, QuorumSource::Estimators);
        assert_eq!(quorum.size(), 1);

        let session = use_case
            .unassign_estimator(session.id, UserId::new(2))
            .await
            .unwrap();
        assert_eq!(Quorum::resolve(&session).size(), 2);
    }

    #[tokio::test]
    async fn test_repeated_change_records_one_event() {
        let (use_case, sink) = use_case();
        let session = use_case.open(NewSession::new("Sprint")).await.unwrap();

        use_case.add_participant(session.id, UserId::new(5)).await.unwrap();
        let session = use_case.add_participant(session.id, UserId::new(5)).await.unwrap();

        assert_eq!(session.participants.len(), 1);
        assert_eq!(sink.count("session_changed"), 1);
    }

    #[tokio::test]
    async fn test_remove_participant() {
        let (use_case, _) = use_case();
        let session = use_case
            .open(NewSession::new("Sprint").with_participants([UserId::new(1)]))
            .await
            .unwrap();

        let session = use_case
            .remove_participant(session.id, UserId::new(1))
            .await
            .unwrap();
        assert!(session.participants.is_empty());
        assert_eq!(Quorum::resolve(&session).source, QuorumSource::Empty);
    }

    #[tokio::test]
    async fn test_close_session() {
        let (use_case, _) = use_case();
        let session = use_case.open(NewSession::new("Sprint")).await.unwrap();

        let closed = use_case.close(session.id).await.unwrap();
        assert_eq!(closed.status, SessionStatus::Closed);
        assert!(closed.closed_at.is_some());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (use_case, _) = use_case();
        let err = use_case
            .add_participant(SessionId::new(40), UserId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, EstimationError::NotFound { id: 40, .. }));
    }
}

//! In-memory session store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poker_application::{SessionStore, StoreError};
use poker_domain::{MembershipChange, NewSession, Session, SessionId};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<BTreeMap<SessionId, Session>>,
    next_id: AtomicU64,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, new: NewSession, now: DateTime<Utc>) -> Result<Session, StoreError> {
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let session = Session::open(id, new, now);
        self.sessions.write().await.insert(id, session.clone());
        Ok(session)
    }

    async fn get(&self, id: SessionId) -> Result<Session, StoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::session_not_found(id))
    }

    async fn apply(
        &self,
        id: SessionId,
        change: MembershipChange,
        now: DateTime<Utc>,
    ) -> Result<(Session, bool), StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| StoreError::session_not_found(id))?;
        let changed = session.apply(&change, now);
        Ok((session.clone(), changed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poker_domain::UserId;

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let store = InMemorySessionStore::new();
        let session = store
            .insert(NewSession::new("Sprint"), Utc::now())
            .await
            .unwrap();

        let snapshot = store.get(session.id).await.unwrap();
        store
            .apply(session.id, MembershipChange::AddParticipant(UserId::new(1)), Utc::now())
            .await
            .unwrap();

        assert!(snapshot.participants.is_empty());
        assert_eq!(store.get(session.id).await.unwrap().participants.len(), 1);
    }

    #[tokio::test]
    async fn test_apply_reports_change() {
        let store = InMemorySessionStore::new();
        let session = store
            .insert(NewSession::new("Sprint"), Utc::now())
            .await
            .unwrap();

        let (_, changed) = store
            .apply(session.id, MembershipChange::Pause, Utc::now())
            .await
            .unwrap();
        assert!(changed);
        let (_, changed) = store
            .apply(session.id, MembershipChange::Pause, Utc::now())
            .await
            .unwrap();
        assert!(!changed);
    }

    #[tokio::test]
    async fn test_apply_unknown_session() {
        let store = InMemorySessionStore::new();
        let err = store
            .apply(SessionId::new(9), MembershipChange::Close, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::session_not_found(SessionId::new(9)));
    }
}

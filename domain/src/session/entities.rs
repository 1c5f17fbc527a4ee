//! Session entity
//!
//! A session owns issues and carries two user sets: the participants who may
//! join and observe, and an optional explicit list of estimators. Sessions are
//! handled as snapshot values; callers re-fetch before each evaluation.

use super::membership::MembershipChange;
use crate::core::ids::{SessionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lifecycle status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Paused,
    Closed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Paused => "paused",
            SessionStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data needed to open a session; the store assigns the id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSession {
    pub name: String,
    pub project_key: Option<String>,
    pub participants: BTreeSet<UserId>,
    pub estimators: BTreeSet<UserId>,
}

impl NewSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_project_key(mut self, key: impl Into<String>) -> Self {
        self.project_key = Some(key.into());
        self
    }

    pub fn with_participants(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.participants.extend(users);
        self
    }

    pub fn with_estimators(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.estimators.extend(users);
        self
    }
}

/// Planning-poker session
///
/// `estimators` is not required to be a subset of `participants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub project_key: Option<String>,
    pub status: SessionStatus,
    pub participants: BTreeSet<UserId>,
    pub estimators: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn open(id: SessionId, new: NewSession, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            project_key: new.project_key,
            status: SessionStatus::Active,
            participants: new.participants,
            estimators: new.estimators,
            created_at: now,
            closed_at: None,
        }
    }

    /// Apply a membership or lifecycle change.
    ///
    /// Returns `true` when the session actually changed; repeating a change is
    /// a no-op.
    pub fn apply(&mut self, change: &MembershipChange, now: DateTime<Utc>) -> bool {
        match *change {
            MembershipChange::AddParticipant(user) => self.participants.insert(user),
            MembershipChange::RemoveParticipant(user) => self.participants.remove(&user),
            MembershipChange::AssignEstimator(user) => self.estimators.insert(user),
            MembershipChange::UnassignEstimator(user) => self.estimators.remove(&user),
            MembershipChange::Pause => self.reopen(SessionStatus::Paused),
            MembershipChange::Resume => self.reopen(SessionStatus::Active),
            MembershipChange::Close => {
                if self.status == SessionStatus::Closed {
                    return false;
                }
                self.status = SessionStatus::Closed;
                self.closed_at = Some(now);
                true
            }
        }
    }

    /// Move to a non-closed status; leaving `Closed` clears `closed_at`.
    fn reopen(&mut self, status: SessionStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.closed_at = None;
        true
    }

    pub fn is_closed(&self) -> bool {
        self.status == SessionStatus::Closed
    }
}

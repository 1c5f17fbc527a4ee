//! Membership and lifecycle changes applied to a session

use crate::core::ids::UserId;
use serde::{Deserialize, Serialize};

/// A single change to a session's membership or status
///
/// Changes never trigger re-evaluation of issues already voted on; shrinking
/// the estimator set after votes exist is picked up only by the next vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", content = "user", rename_all = "snake_case")]
pub enum MembershipChange {
    AddParticipant(UserId),
    RemoveParticipant(UserId),
    AssignEstimator(UserId),
    UnassignEstimator(UserId),
    Pause,
    Resume,
    Close,
}

impl MembershipChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipChange::AddParticipant(_) => "add_participant",
            MembershipChange::RemoveParticipant(_) => "remove_participant",
            MembershipChange::AssignEstimator(_) => "assign_estimator",
            MembershipChange::UnassignEstimator(_) => "unassign_estimator",
            MembershipChange::Pause => "pause",
            MembershipChange::Resume => "resume",
            MembershipChange::Close => "close",
        }
    }
}

impl std::fmt::Display for MembershipChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipChange::AddParticipant(u)
            | MembershipChange::RemoveParticipant(u)
            | MembershipChange::AssignEstimator(u)
            | MembershipChange::UnassignEstimator(u) => write!(f, "{} {}", self.as_str(), u),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

//! Quorum resolution
//!
//! Decides whose votes are required before an issue can be evaluated. The
//! quorum is session-scoped: every issue in a session shares it, and it is
//! resolved from the live session each time rather than cached.

use crate::core::ids::UserId;
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the required voter set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuorumSource {
    /// The session's explicit estimator list
    Estimators,
    /// All participants (no estimators assigned)
    Participants,
    /// Neither set has members; nothing can be evaluated
    Empty,
}

/// The set of users whose votes are required
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use poker_domain::estimation::{Quorum, QuorumSource};
/// use poker_domain::session::{NewSession, Session};
/// use poker_domain::{SessionId, UserId};
///
/// let session = Session::open(
///     SessionId::new(1),
///     NewSession::new("Sprint")
///         .with_participants([UserId::new(1), UserId::new(2), UserId::new(3)])
///         .with_estimators([UserId::new(1)]),
///     Utc::now(),
/// );
///
/// let quorum = Quorum::resolve(&session);
/// assert_eq!(quorum.source, QuorumSource::Estimators);
/// assert_eq!(quorum.size(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quorum {
    pub voters: BTreeSet<UserId>,
    pub source: QuorumSource,
}

impl Quorum {
    /// Estimators if any are assigned, else participants, else empty
    pub fn resolve(session: &Session) -> Self {
        if !session.estimators.is_empty() {
            Self {
                voters: session.estimators.clone(),
                source: QuorumSource::Estimators,
            }
        } else if !session.participants.is_empty() {
            Self {
                voters: session.participants.clone(),
                source: QuorumSource::Participants,
            }
        } else {
            Self {
                voters: BTreeSet::new(),
                source: QuorumSource::Empty,
            }
        }
    }

    pub fn size(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    /// Whether `cast` votes are enough to evaluate.
    ///
    /// Only the count is compared; votes from users outside the quorum still
    /// count toward it.
    pub fn is_met_by(&self, cast: usize) -> bool {
        !self.is_empty() && cast >= self.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SessionId;
    use crate::session::NewSession;
    use chrono::Utc;

    fn users(ids: &[u64]) -> Vec<UserId> {
        ids.iter().copied().map(UserId::new).collect()
    }

    fn session(participants: &[u64], estimators: &[u64]) -> Session {
        Session::open(
            SessionId::new(1),
            NewSession::new("Sprint")
                .with_participants(users(participants))
                .with_estimators(users(estimators)),
            Utc::now(),
        )
    }

    #[test]
    fn test_estimators_take_precedence() {
        let quorum = Quorum::resolve(&session(&[1, 2, 3, 4], &[2, 3]));
        assert_eq!(quorum.source, QuorumSource::Estimators);
        assert_eq!(
            quorum.voters,
            users(&[2, 3]).into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_falls_back_to_participants() {
        let quorum = Quorum::resolve(&session(&[1, 2, 3], &[]));
        assert_eq!(quorum.source, QuorumSource::Participants);
        assert_eq!(quorum.size(), 3);
    }

    #[test]
    fn test_empty_session_has_zero_quorum() {
        let quorum = Quorum::resolve(&session(&[], &[]));
        assert_eq!(quorum.source, QuorumSource::Empty);
        assert_eq!(quorum.size(), 0);
        assert!(!quorum.is_met_by(5));
    }

    #[test]
    fn test_estimators_outside_participants_are_used() {
        let quorum = Quorum::resolve(&session(&[1], &[7, 8]));
        assert_eq!(quorum.size(), 2);
        assert!(quorum.voters.contains(&UserId::new(7)));
    }

    #[test]
    fn test_is_met_by_counts_votes() {
        let quorum = Quorum::resolve(&session(&[1, 2, 3], &[]));
        assert!(!quorum.is_met_by(2));
        assert!(quorum.is_met_by(3));
        assert!(quorum.is_met_by(4));
    }
}

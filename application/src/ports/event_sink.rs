//! Port for structured estimation events.
//!
//! Defines the [`EstimationEventSink`] trait for recording what happened to
//! votes, issues and sessions (vote recorded, issue finalized, membership
//! changed). The transport layer uses it to push verdicts to clients; the
//! infrastructure layer provides a JSONL writer.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! record of every estimation event.

use poker_domain::{Finalization, MembershipChange, Session, Verdict, Vote};
use serde_json::{Value, json};

/// A structured estimation event.
pub struct EstimationEvent {
    /// Event type identifier (e.g., "vote_recorded", "issue_finalized").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl EstimationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn vote_recorded(vote: &Vote, verdict: &Verdict) -> Self {
        Self::new(
            "vote_recorded",
            json!({
                "issue_id": vote.issue_id,
                "user_id": vote.user_id,
                "card": vote.card().to_string(),
                "reached": verdict.is_reached(),
                "final_value": verdict.final_points(),
            }),
        )
    }

    pub fn issue_finalized(finalization: &Finalization) -> Self {
        Self::new(
            "issue_finalized",
            json!({
                "issue_id": finalization.issue_id,
                "story_points": finalization.story_points,
                "story_points_before": finalization.story_points_before,
            }),
        )
    }

    pub fn session_changed(session: &Session, change: &MembershipChange) -> Self {
        Self::new(
            "session_changed",
            json!({
                "session_id": session.id,
                "change": change.as_str(),
                "status": session.status.as_str(),
                "participants": session.participants.len(),
                "estimators": session.estimators.len(),
            }),
        )
    }
}

/// Port for recording estimation events.
///
/// `record` is synchronous and non-fallible so that a broken sink never
/// fails a vote submission.
pub trait EstimationEventSink: Send + Sync {
    fn record(&self, event: EstimationEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoEventSink;

impl EstimationEventSink for NoEventSink {
    fn record(&self, _event: EstimationEvent) {}
}

//! Application layer for planning-poker
//!
//! This crate contains use cases, port definitions, and estimation settings.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EstimationParams;
pub use ports::{
    clock::{Clock, SystemClock},
    event_sink::{EstimationEvent, EstimationEventSink, NoEventSink},
    store::{EntityKind, IssueStore, SessionStore, StoreError, VoteFilter, VoteStore, VoteWrite},
};
pub use use_cases::build_summary::BuildSummaryUseCase;
pub use use_cases::error::EstimationError;
pub use use_cases::manage_session::ManageSessionUseCase;
pub use use_cases::register_issue::RegisterIssueUseCase;
pub use use_cases::submit_vote::{SubmitVoteInput, SubmitVoteOutput, SubmitVoteUseCase};
pub use use_cases::vote_queries::{ListVotesQuery, VoteHistoryQuery, VoteQueryUseCase};

//! Domain layer for planning-poker
//!
//! This crate contains the estimation rules, entities, and value objects.
//! It has no dependencies on storage, transport, or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Votes and cards
//!
//! Each user holds at most one [`Vote`] per issue. A vote carries a numeric
//! [`Card`] or the joker, which abstains from the math but still counts
//! toward the quorum.
//!
//! ## Quorum
//!
//! The [`Quorum`] of a session is its explicit estimators, or all its
//! participants when none are assigned.
//!
//! ## Consensus
//!
//! [`ConsensusPolicy::evaluate`] decides whether an issue is settled. A reached
//! [`Verdict`] is applied once through [`Issue::finalize`]; after that the issue
//! is latched and later votes only affect the read-side [`EstimateSummary`].

pub mod core;
pub mod estimation;
pub mod issue;
pub mod session;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    ids::{IssueId, SessionId, UserId},
};
pub use estimation::{
    Card, ConsensusPolicy, DEFAULT_DENOMINATIONS, DEFAULT_MAX_SPREAD, Deck, EstimateSummary,
    PendingReason, Quorum, QuorumSource, Verdict, Vote,
};
pub use issue::{Finalization, Issue, NewIssue};
pub use session::{MembershipChange, NewSession, Session, SessionStatus};

//! Estimation domain
//!
//! The rules that turn a set of per-user votes into a settled estimate.
//!
//! # Flow
//!
//! ```text
//! vote upsert ──▶ Quorum::resolve(session) ──▶ ConsensusPolicy::evaluate
//!                                                      │
//!                                     Verdict::Reached ▼
//!                                              Issue::finalize (one-shot)
//!
//! EstimateSummary::from_votes  (read-only, any time)
//! ```
//!
//! Consensus means every numeric vote lies within `max_spread` (2 by default)
//! of the others. Jokers count toward the quorum but never toward the math.

pub mod card;
pub mod consensus;
pub mod quorum;
pub mod summary;
pub mod vote;

pub use card::{Card, DEFAULT_DENOMINATIONS, Deck};
pub use consensus::{ConsensusPolicy, DEFAULT_MAX_SPREAD, PendingReason, Verdict};
pub use quorum::{Quorum, QuorumSource};
pub use summary::EstimateSummary;
pub use vote::Vote;

//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod build_summary;
pub mod error;
pub mod manage_session;
pub mod register_issue;
pub mod submit_vote;
pub mod vote_queries;

#[cfg(test)]
pub(crate) mod test_support;

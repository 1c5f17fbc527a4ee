//! Session domain
//!
//! Sessions group issues and define who may vote on them. The session is the
//! only input the quorum resolver needs.

pub mod entities;
pub mod membership;

pub use entities::{NewSession, Session, SessionStatus};
pub use membership::MembershipChange;

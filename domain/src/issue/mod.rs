//! Issue domain
//!
//! Issues are imported from the tracker into a session. The engine only
//! writes their estimate fields, through [`Issue::finalize`].

pub mod entities;

pub use entities::{Finalization, Issue, NewIssue};

//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: identifiers for users, issues and sessions
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;

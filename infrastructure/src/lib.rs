//! Infrastructure layer for planning-poker
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: in-memory stores, the JSONL event log,
//! configuration file loading and scenario parsing.

pub mod config;
pub mod logging;
pub mod scenario;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEstimationConfig, FileLoggingConfig,
};
pub use logging::JsonlEventLog;
pub use scenario::{Scenario, ScenarioError, ScenarioLoader};
pub use store::{InMemoryIssueStore, InMemorySessionStore, InMemoryVoteStore};

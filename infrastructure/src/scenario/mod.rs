//! Scenario files for replaying estimation rounds
//!
//! A scenario is a TOML document describing sessions, their issues and an
//! ordered list of votes. The CLI replays it against the in-memory stores.

mod loader;
mod types;

pub use loader::{ScenarioError, ScenarioLoader};
pub use types::{Scenario, ScenarioIssue, ScenarioSession, ScenarioVote};

//! Presentation layer for planning-poker
//!
//! This crate contains CLI definitions, report formatters and
//! replay progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::report::{IssueReport, RejectedVote, ReplayReport, SessionReport};
pub use progress::reporter::{NoProgress, ProgressReporter, ReplayProgress, SimpleProgress};

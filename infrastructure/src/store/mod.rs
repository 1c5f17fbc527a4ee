//! Storage adapters
//!
//! In-memory implementations of the application's store ports. Each store
//! serializes writes behind a `tokio::sync::RwLock`, which gives the
//! compare-and-set in [`InMemoryIssueStore`] the atomicity finalization needs.

mod issues;
mod sessions;
mod votes;

pub use issues::InMemoryIssueStore;
pub use sessions::InMemorySessionStore;
pub use votes::InMemoryVoteStore;

//! Estimation event logging.
//!
//! Provides [`JsonlEventLog`], a JSONL file writer that implements the
//! [`EstimationEventSink`](poker_application::EstimationEventSink) port.

mod jsonl_event_log;

pub use jsonl_event_log::JsonlEventLog;

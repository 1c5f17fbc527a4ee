//! Application-level configuration.
//!
//! - [`EstimationParams`]: consensus policy and finalization retry control

pub mod estimation_params;

pub use estimation_params::EstimationParams;

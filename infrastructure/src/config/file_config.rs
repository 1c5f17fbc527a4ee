//! Raw TOML configuration data types

use poker_application::EstimationParams;
use poker_application::config::estimation_params::DEFAULT_FINALIZE_RETRIES;
use poker_domain::{ConsensusPolicy, DEFAULT_DENOMINATIONS, DEFAULT_MAX_SPREAD, Deck, DomainError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("estimation.deck is invalid: {0}")]
    InvalidDeck(#[source] DomainError),

    #[error("estimation.finalize_retries must be at least 1")]
    ZeroFinalizeRetries,

    #[error("logging.level '{0}' is not a valid filter")]
    InvalidLogLevel(String),
}

/// Raw estimation configuration (`[estimation]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEstimationConfig {
    /// Ascending card denominations a reached estimate snaps to
    pub deck: Vec<u32>,
    /// Largest allowed distance between min and max numeric votes
    pub max_spread: u32,
    /// Internal retries after a finalization conflict
    pub finalize_retries: usize,
}

impl Default for FileEstimationConfig {
    fn default() -> Self {
        Self {
            deck: DEFAULT_DENOMINATIONS.to_vec(),
            max_spread: DEFAULT_MAX_SPREAD,
            finalize_retries: DEFAULT_FINALIZE_RETRIES,
        }
    }
}

/// Raw logging configuration (`[logging]` section)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Diagnostic filter (e.g. "info", "poker_application=debug").
    /// Overrides the `-v` count when set.
    pub level: Option<String>,
    /// JSONL estimation event log path
    pub event_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub estimation: FileEstimationConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        Deck::new(self.estimation.deck.clone()).map_err(ConfigValidationError::InvalidDeck)?;

        if self.estimation.finalize_retries == 0 {
            return Err(ConfigValidationError::ZeroFinalizeRetries);
        }

        if let Some(level) = &self.logging.level
            && level.trim().is_empty()
        {
            return Err(ConfigValidationError::InvalidLogLevel(level.clone()));
        }

        Ok(())
    }

    /// Convert to the application's estimation parameters
    pub fn to_params(&self) -> Result<EstimationParams, ConfigValidationError> {
        let deck =
            Deck::new(self.estimation.deck.clone()).map_err(ConfigValidationError::InvalidDeck)?;

        Ok(EstimationParams::default()
            .with_policy(ConsensusPolicy::new(deck, self.estimation.max_spread))
            .with_finalize_retries(self.estimation.finalize_retries))
    }
}

//! Scenario file parsing and cross-reference checks

use super::types::Scenario;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Scenario defines no sessions")]
    NoSessions,

    #[error("Issue key '{0}' is defined more than once")]
    DuplicateIssue(String),

    #[error("Vote #{index} references unknown issue '{key}'")]
    UnknownIssue { index: usize, key: String },
}

pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::parse(&content)?;
        debug!(
            "Loaded scenario {} ({} sessions, {} votes)",
            path.display(),
            scenario.sessions.len(),
            scenario.votes.len()
        );
        Ok(scenario)
    }

    /// Parse and check that issue keys are unique and every vote resolves.
    pub fn parse(content: &str) -> Result<Scenario, ScenarioError> {
        let scenario: Scenario = toml::from_str(content)?;

        if scenario.sessions.is_empty() {
            return Err(ScenarioError::NoSessions);
        }

        let mut keys = HashSet::new();
        for issue in scenario.sessions.iter().flat_map(|s| &s.issues) {
            if !keys.insert(issue.key.as_str()) {
                return Err(ScenarioError::DuplicateIssue(issue.key.clone()));
            }
        }

        if let Some((index, vote)) = scenario
            .votes
            .iter()
            .enumerate()
            .find(|(_, v)| !keys.contains(v.issue.as_str()))
        {
            return Err(ScenarioError::UnknownIssue {
                index: index + 1,
                key: vote.issue.clone(),
            });
        }

        Ok(scenario)
    }
}

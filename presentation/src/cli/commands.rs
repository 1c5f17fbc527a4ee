//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for replay reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with per-user estimates
    Full,
    /// One line per issue
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for planning-poker
#[derive(Parser, Debug)]
#[command(name = "planning-poker")]
#[command(author, version, about = "Planning poker estimation engine - replay voting rounds")]
#[command(long_about = r#"
Replays a planning-poker scenario through the estimation engine.

A scenario file lists sessions (participants, estimators and issues) and an
ordered series of votes. Every vote goes through the same submission path a
live server uses: the vote is stored, the issue is evaluated against its
session's quorum, and the issue is finalized once consensus is reached.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./poker.toml        Project-level config
3. ~/.config/planning-poker/config.toml   Global config

Example:
  planning-poker sprint-12.toml
  planning-poker -o summary sprint-12.toml
  planning-poker --events events.jsonl -o json sprint-12.toml
"#)]
pub struct Cli {
    /// Scenario file to replay
    #[arg(value_name = "SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Write estimation events to this JSONL file (overrides logging.event_log)
    #[arg(long, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

//! CLI entrypoint for planning-poker
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod replay;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use poker_application::{EstimationEventSink, NoEventSink};
use poker_infrastructure::{ConfigLoader, FileConfig, JsonlEventLog, ScenarioLoader};
use poker_presentation::{
    Cli, ConsoleFormatter, NoProgress, OutputFormat, ProgressReporter, ReplayProgress,
};
use replay::Replayer;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    init_tracing(cli.verbose, &config)?;
    info!("Starting planning-poker");

    let Some(scenario_path) = &cli.scenario else {
        bail!("A scenario file is required. Use --show-config to inspect configuration.");
    };
    let scenario = ScenarioLoader::load(scenario_path)?;

    // === Dependency Injection ===
    let events: Arc<dyn EstimationEventSink> =
        match cli.events.as_ref().or(config.logging.event_log.as_ref()) {
            Some(path) => match JsonlEventLog::open(path) {
                Some(log) => {
                    info!("Writing estimation events to {}", log.path().display());
                    Arc::new(log)
                }
                None => Arc::new(NoEventSink),
            },
            None => Arc::new(NoEventSink),
        };

    let progress: Box<dyn ReplayProgress> = if cli.quiet || cli.output == OutputFormat::Json {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let replayer = Replayer::new(config.to_params()?, events);
    let report = replayer
        .run(&scenario, progress.as_ref())
        .await
        .with_context(|| format!("replaying {}", scenario_path.display()))?;

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&report),
        OutputFormat::Summary => ConsoleFormatter::format_summary_only(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };

    println!("{}", output);

    Ok(())
}

/// `logging.level` wins over the `-v` count
fn init_tracing(verbose: u8, config: &FileConfig) -> Result<()> {
    let filter = match &config.logging.level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid logging.level '{}'", level))?,
        None => match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

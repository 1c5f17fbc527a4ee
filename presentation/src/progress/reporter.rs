//! Progress reporting while a scenario replays

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use poker_application::SubmitVoteOutput;
use std::sync::Mutex;

/// Observer for the replay loop
pub trait ReplayProgress {
    fn on_start(&self, _total_votes: usize) {}

    fn on_vote(&self, _issue_key: &str, _output: &SubmitVoteOutput) {}

    fn on_rejected(&self, _issue_key: &str, _reason: &str) {}

    fn on_finish(&self) {}
}

/// Silent progress (for --quiet and JSON output)
pub struct NoProgress;

impl ReplayProgress for NoProgress {}

/// Progress bar over the scenario's votes
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayProgress for ProgressReporter {
    fn on_start(&self, total_votes: usize) {
        let bar = ProgressBar::new(total_votes as u64);
        bar.set_style(Self::style());
        bar.set_prefix("Replaying votes");
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_vote(&self, issue_key: &str, output: &SubmitVoteOutput) {
        self.with_bar(|bar| {
            if let Some(finalization) = &output.finalization {
                bar.println(format!(
                    "{} {} estimated at {} points",
                    "v".green(),
                    issue_key,
                    finalization.story_points
                ));
            }
            bar.set_message(format!("{} #{}", issue_key, output.vote.user_id));
            bar.inc(1);
        });
    }

    fn on_rejected(&self, issue_key: &str, reason: &str) {
        self.with_bar(|bar| {
            bar.println(format!("{} {} {}", "x".red(), issue_key, reason));
            bar.inc(1);
        });
    }

    fn on_finish(&self) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message("done".green().to_string());
        }
    }
}

/// Plain line-per-vote progress (no terminal control codes)
pub struct SimpleProgress;

impl ReplayProgress for SimpleProgress {
    fn on_vote(&self, issue_key: &str, output: &SubmitVoteOutput) {
        let vote = &output.vote;
        println!(
            "  {} {} #{} played {} -> {}",
            "->".cyan(),
            issue_key,
            vote.user_id,
            vote.card(),
            output.verdict
        );
    }

    fn on_rejected(&self, issue_key: &str, reason: &str) {
        println!("  {} {} ({})", "x".red(), issue_key, reason);
    }
}

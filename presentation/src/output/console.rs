//! Console output formatter for replay reports

use super::report::{IssueReport, ReplayReport, SessionReport};
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use poker_domain::{EstimateSummary, Quorum, QuorumSource, Verdict};

/// Formats replay reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(report: &ReplayReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Planning Poker Results"));
        output.push('\n');

        for session in &report.sessions {
            output.push_str(&Self::session_section(session));
        }

        if !report.rejected.is_empty() {
            output.push_str(&Self::section_header("Rejected Votes"));
            for rejected in &report.rejected {
                output.push_str(&format!(
                    "  {} #{} {} by user {}: {}\n",
                    "x".red(),
                    rejected.index,
                    rejected.issue_key,
                    rejected.user_id,
                    rejected.reason
                ));
            }
        }

        output.push_str(&format!(
            "\n{} {} votes replayed, {} of {} issues estimated\n",
            "Totals:".cyan().bold(),
            report.votes_replayed,
            report.estimated_count(),
            report.issues().count()
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &ReplayReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per issue
    pub fn format_summary_only(report: &ReplayReport) -> String {
        let mut output = String::new();
        for entry in report.issues() {
            let status = match entry.issue.story_points {
                Some(points) if entry.issue.is_estimated => {
                    format!("{} pts", points).green().bold().to_string()
                }
                _ => match entry.verdict.pending_reason() {
                    Some(reason) => format!("pending ({})", reason).yellow().to_string(),
                    None => entry.verdict.to_string(),
                },
            };
            output.push_str(&format!(
                "{:<12} {}  {}\n",
                entry.issue.key,
                status,
                entry.issue.title.dimmed()
            ));
        }
        output
    }

    fn session_section(report: &SessionReport) -> String {
        let session = &report.session;
        let mut output = Self::section_header(&format!("Session: {}", session.name));

        if let Some(key) = &session.project_key {
            output.push_str(&format!("{} {}\n", "Project:".cyan(), key));
        }
        let quorum = Quorum::resolve(session);
        let source = match quorum.source {
            QuorumSource::Estimators => "estimators",
            QuorumSource::Participants => "participants",
            QuorumSource::Empty => "nobody",
        };
        output.push_str(&format!(
            "{} {} ({}) | {} {}\n",
            "Quorum:".cyan(),
            quorum.size(),
            source,
            "Status:".cyan(),
            session.status.as_str()
        ));

        for entry in &report.issues {
            output.push_str(&Self::issue_block(entry));
        }
        output
    }

    fn issue_block(entry: &IssueReport) -> String {
        let issue = &entry.issue;
        let mut output = format!(
            "\n{} {}\n",
            format!("── {} ──", issue.key).yellow().bold(),
            issue.title
        );

        let outcome = match (issue.is_estimated, issue.story_points) {
            (true, Some(points)) => {
                let before = issue
                    .story_points_before
                    .map(|p| format!(" (was {})", p))
                    .unwrap_or_default();
                format!("{}{}", format!("{} points", points).green().bold(), before)
            }
            _ => match &entry.verdict {
                Verdict::Reached { final_points } => {
                    format!("consensus on {} (not yet saved)", final_points)
                }
                Verdict::NotReached { reason } => format!("pending: {}", reason).yellow().to_string(),
            },
        };
        output.push_str(&format!("  {} {}\n", "Estimate:".bold(), outcome));

        match &entry.summary {
            Some(summary) => {
                output.push_str(&format!("  {} {}\n", "Votes:".bold(), Self::stats(summary)));
                output.push_str(&format!(
                    "  {} {}\n",
                    "Cards:".bold(),
                    Self::cards(summary)
                ));
            }
            None => output.push_str(&format!("  {}\n", "No votes".dimmed())),
        }
        output
    }

    fn stats(summary: &EstimateSummary) -> String {
        let consensus = if summary.is_consensus {
            "consensus".green()
        } else {
            "no consensus".red()
        };
        format!(
            "{} total, {} numeric, {} jokers | min {} max {} avg {:.2} | {}",
            summary.total_estimates,
            summary.valid_estimates,
            summary.joker_count,
            summary.min_points,
            summary.max_points,
            summary.avg_points,
            consensus
        )
    }

    fn cards(summary: &EstimateSummary) -> String {
        summary
            .estimates
            .iter()
            .map(|(user, card)| format!("#{}={}", user, card))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &ReplayReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &ReplayReport) -> String {
        Self::format_json(report)
    }

    fn format_summary_only(&self, report: &ReplayReport) -> String {
        Self::format_summary_only(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::RejectedVote;
    use chrono::Utc;
    use poker_domain::{
        Card, ConsensusPolicy, Issue, IssueId, NewIssue, NewSession, PendingReason, Session,
        SessionId, UserId, Vote,
    };

    fn report() -> ReplayReport {
        let now = Utc::now();
        let session = Session::open(
            SessionId::new(1),
            NewSession::new("Sprint 12")
                .with_project_key("PROJ")
                .with_estimators([UserId::new(1), UserId::new(2)]),
            now,
        );

        let mut done = Issue::register(
            IssueId::new(1),
            NewIssue::new(session.id, "PROJ-1", "Search by tag").with_story_points(3),
            now,
        );
        done.finalize(&Verdict::Reached { final_points: 4 }, now);
        let votes = vec![
            Vote::new(done.id, UserId::new(1), Card::Points(4), now),
            Vote::new(done.id, UserId::new(2), Card::Joker, now),
        ];
        let summary = EstimateSummary::from_votes(done.id, &votes, &ConsensusPolicy::default());

        let open = Issue::register(
            IssueId::new(2),
            NewIssue::new(session.id, "PROJ-2", "Export CSV"),
            now,
        );

        ReplayReport {
            sessions: vec![SessionReport {
                session,
                issues: vec![
                    IssueReport {
                        issue: done,
                        verdict: Verdict::pending(PendingReason::AlreadyEstimated),
                        summary,
                    },
                    IssueReport {
                        issue: open,
                        verdict: Verdict::pending(PendingReason::AwaitingVotes {
                            cast: 0,
                            required: 2,
                        }),
                        summary: None,
                    },
                ],
            }],
            votes_replayed: 3,
            rejected: vec![RejectedVote {
                index: 3,
                issue_key: "PROJ-2".to_string(),
                user_id: UserId::new(2),
                reason: "joker votes must carry 0 points, got 5".to_string(),
            }],
        }
    }

    #[test]
    fn test_format_full() {
        let output = ConsoleFormatter::format(&report());
        assert!(output.contains("Sprint 12"));
        assert!(output.contains("PROJ-1"));
        assert!(output.contains("4 points"));
        assert!(output.contains("(was 3)"));
        assert!(output.contains("#1=4 #2=J"));
        assert!(output.contains("No votes"));
        assert!(output.contains("Rejected Votes"));
    }

    #[test]
    fn test_format_summary_only() {
        let output = ConsoleFormatter::format_summary_only(&report());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("PROJ-1"));
        assert!(lines[0].contains("4 pts"));
        assert!(lines[1].contains("awaiting votes (0/2)"));
    }

    #[test]
    fn test_format_json() {
        let json = ConsoleFormatter::format_json(&report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let issue = &value["sessions"][0]["issues"][0];
        assert_eq!(issue["issue"]["story_points"], 4);
        assert_eq!(issue["summary"]["joker_count"], 1);
        assert_eq!(issue["summary"]["estimates"]["2"], "joker");
        assert_eq!(value["rejected"][0]["index"], 3);
    }
}

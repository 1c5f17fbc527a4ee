//! Scenario replay against the in-memory stores

use anyhow::{Context, Result};
use poker_application::{
    BuildSummaryUseCase, EstimationError, EstimationEventSink, EstimationParams,
    ManageSessionUseCase, RegisterIssueUseCase, SubmitVoteInput, SubmitVoteUseCase,
};
use poker_domain::{IssueId, UserId};
use poker_infrastructure::{InMemoryIssueStore, InMemorySessionStore, InMemoryVoteStore, Scenario};
use poker_presentation::{IssueReport, RejectedVote, ReplayProgress, ReplayReport, SessionReport};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Replayer {
    votes: Arc<InMemoryVoteStore>,
    issues: Arc<InMemoryIssueStore>,
    sessions: Arc<InMemorySessionStore>,
    params: EstimationParams,
    events: Arc<dyn EstimationEventSink>,
}

impl Replayer {
    pub fn new(params: EstimationParams, events: Arc<dyn EstimationEventSink>) -> Self {
        Self {
            votes: Arc::new(InMemoryVoteStore::new()),
            issues: Arc::new(InMemoryIssueStore::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            params,
            events,
        }
    }

    pub async fn run(&self, scenario: &Scenario, progress: &dyn ReplayProgress) -> Result<ReplayReport> {
        let manage = ManageSessionUseCase::new(Arc::clone(&self.sessions))
            .with_events(Arc::clone(&self.events));
        let register = RegisterIssueUseCase::new(Arc::clone(&self.issues), Arc::clone(&self.sessions));
        let submit = SubmitVoteUseCase::new(
            Arc::clone(&self.votes),
            Arc::clone(&self.issues),
            Arc::clone(&self.sessions),
        )
        .with_params(self.params.clone())
        .with_events(Arc::clone(&self.events));
        let summaries =
            BuildSummaryUseCase::new(Arc::clone(&self.votes)).with_policy(self.params.policy.clone());

        let mut session_ids = Vec::new();
        let mut issue_ids: HashMap<&str, IssueId> = HashMap::new();
        for entry in &scenario.sessions {
            let session = manage
                .open(entry.to_new_session())
                .await
                .with_context(|| format!("opening session '{}'", entry.name))?;
            for issue in &entry.issues {
                let registered = register
                    .register(issue.to_new_issue(session.id))
                    .await
                    .with_context(|| format!("registering issue '{}'", issue.key))?;
                issue_ids.insert(issue.key.as_str(), registered.id);
            }
            session_ids.push(session.id);
        }

        let mut report = ReplayReport::default();
        progress.on_start(scenario.votes.len());
        for (index, vote) in scenario.votes.iter().enumerate() {
            let issue_id = issue_ids
                .get(vote.issue.as_str())
                .copied()
                .with_context(|| format!("vote #{} references unknown issue '{}'", index + 1, vote.issue))?;
            let input = SubmitVoteInput::new(issue_id, UserId::new(vote.user), vote.points, vote.joker);

            match submit.execute(input).await {
                Ok(output) => {
                    report.votes_replayed += 1;
                    progress.on_vote(&vote.issue, &output);
                }
                // a bad card or a lost finalization race rejects the vote, not the replay
                Err(e) if e.is_transient() || matches!(e, EstimationError::Validation(_)) => {
                    warn!("Vote #{} on {} rejected: {}", index + 1, vote.issue, e);
                    progress.on_rejected(&vote.issue, &e.to_string());
                    report.rejected.push(RejectedVote {
                        index: index + 1,
                        issue_key: vote.issue.clone(),
                        user_id: UserId::new(vote.user),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e).with_context(|| format!("replaying vote #{}", index + 1)),
            }
        }
        progress.on_finish();

        for session_id in session_ids {
            let session = manage.get(session_id).await?;
            let mut issues = Vec::new();
            for issue in register.list(session_id).await? {
                issues.push(IssueReport {
                    verdict: submit.evaluate(issue.id).await?,
                    summary: summaries.execute(issue.id).await?,
                    issue,
                });
            }
            report.sessions.push(SessionReport { session, issues });
        }

        info!(
            "Replayed {} votes ({} rejected), {} issues estimated",
            report.votes_replayed,
            report.rejected.len(),
            report.estimated_count()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poker_application::NoEventSink;
    use poker_infrastructure::ScenarioLoader;
    use poker_presentation::NoProgress;

    const SCENARIO: &str = r#"
[[session]]
name = "Sprint 12"
participants = [1, 2, 3, 4]
estimators = [1, 2, 3]

[[session.issue]]
key = "PROJ-1"
title = "Search by tag"

[[session.issue]]
key = "PROJ-2"
title = "Export CSV"

[[vote]]
issue = "PROJ-1"
user = 1
points = 4

[[vote]]
issue = "PROJ-1"
user = 2
points = 4

[[vote]]
issue = "PROJ-1"
user = 3
points = 2

[[vote]]
issue = "PROJ-1"
user = 1
points = 16

[[vote]]
issue = "PROJ-2"
user = 1
points = 5
joker = true

[[vote]]
issue = "PROJ-2"
user = 2
points = 1
"#;

    async fn replay(content: &str) -> ReplayReport {
        let scenario = ScenarioLoader::parse(content).unwrap();
        Replayer::new(EstimationParams::default(), Arc::new(NoEventSink))
            .run(&scenario, &NoProgress)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_replay_finalizes_and_latches() {
        let report = replay(SCENARIO).await;

        assert_eq!(report.votes_replayed, 5);
        let first = &report.sessions[0].issues[0];
        assert!(first.issue.is_estimated);
        assert_eq!(first.issue.story_points, Some(4));
        // the later 16 changed the summary but not the latched estimate
        let summary = first.summary.as_ref().unwrap();
        assert_eq!(summary.max_points, 16);
        assert!(!summary.is_consensus);
    }

    #[tokio::test]
    async fn test_replay_collects_rejections() {
        let report = replay(SCENARIO).await;

        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 5);
        assert_eq!(report.rejected[0].issue_key, "PROJ-2");

        let second = &report.sessions[0].issues[1];
        assert!(!second.issue.is_estimated);
        assert_eq!(second.summary.as_ref().unwrap().total_estimates, 1);
        assert!(!second.verdict.is_reached());
    }
}

use poker_domain::{NewIssue, NewSession, SessionId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, rename = "session")]
    pub sessions: Vec<ScenarioSession>,
    /// Votes in submission order
    #[serde(default, rename = "vote")]
    pub votes: Vec<ScenarioVote>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSession {
    pub name: String,
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub participants: Vec<u64>,
    #[serde(default)]
    pub estimators: Vec<u64>,
    #[serde(default, rename = "issue")]
    pub issues: Vec<ScenarioIssue>,
}

impl ScenarioSession {
    pub fn to_new_session(&self) -> NewSession {
        let mut new = NewSession::new(self.name.clone())
            .with_participants(self.participants.iter().copied().map(UserId::new))
            .with_estimators(self.estimators.iter().copied().map(UserId::new));
        if let Some(key) = &self.project_key {
            new = new.with_project_key(key.clone());
        }
        new
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioIssue {
    /// Tracker key, also used by votes to reference the issue
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Points already recorded in the tracker before estimation
    #[serde(default)]
    pub story_points: Option<u32>,
}

impl ScenarioIssue {
    pub fn to_new_issue(&self, session_id: SessionId) -> NewIssue {
        let mut new = NewIssue::new(session_id, self.key.clone(), self.title.clone());
        if let Some(url) = &self.url {
            new = new.with_url(url.clone());
        }
        if let Some(points) = self.story_points {
            new = new.with_story_points(points);
        }
        new
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioVote {
    /// Key of the issue being voted on
    pub issue: String,
    pub user: u64,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub joker: bool,
}

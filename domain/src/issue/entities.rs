//! Issue entity and the finalization latch

use crate::core::ids::{IssueId, SessionId};
use crate::estimation::consensus::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Data needed to register an issue; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIssue {
    pub session_id: SessionId,
    /// Tracker key, e.g. `PROJ-123`
    pub key: String,
    pub title: String,
    pub url: Option<String>,
    /// Estimate already present in the tracker at import time
    pub story_points: Option<u32>,
}

impl NewIssue {
    pub fn new(session_id: SessionId, key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            session_id,
            key: key.into(),
            title: title.into(),
            url: None,
            story_points: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }
}

/// An issue under estimation
///
/// `version` increases on every successful store write and is the
/// compare-and-set token for finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub session_id: SessionId,
    pub key: String,
    pub title: String,
    pub url: Option<String>,
    pub story_points: Option<u32>,
    pub story_points_before: Option<u32>,
    pub is_estimated: bool,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Record of a single finalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finalization {
    pub issue_id: IssueId,
    pub story_points: u32,
    pub story_points_before: Option<u32>,
}

impl Issue {
    pub fn register(id: IssueId, new: NewIssue, now: DateTime<Utc>) -> Self {
        Self {
            id,
            session_id: new.session_id,
            key: new.key,
            title: new.title,
            url: new.url,
            story_points: new.story_points,
            story_points_before: None,
            is_estimated: false,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a verdict to this issue.
    ///
    /// No-op (returns `None`) when the verdict is not reached or the issue is
    /// already estimated. Otherwise moves the current points into
    /// `story_points_before` and latches `is_estimated`.
    pub fn finalize(&mut self, verdict: &Verdict, now: DateTime<Utc>) -> Option<Finalization> {
        let points = verdict.final_points()?;
        if self.is_estimated {
            return None;
        }

        self.story_points_before = self.story_points;
        self.story_points = Some(points);
        self.is_estimated = true;
        self.updated_at = now;

        Some(Finalization {
            issue_id: self.id,
            story_points: points,
            story_points_before: self.story_points_before,
        })
    }
}

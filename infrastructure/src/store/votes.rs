//! In-memory vote store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poker_application::{StoreError, VoteFilter, VoteStore, VoteWrite};
use poker_domain::{Card, IssueId, UserId, Vote};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct VoteTable {
    /// Votes in insertion order
    rows: Vec<Vote>,
    /// (issue, user) -> position in `rows`
    index: HashMap<(IssueId, UserId), usize>,
}

impl VoteTable {
    fn remove(&mut self, key: (IssueId, UserId)) {
        let Some(position) = self.index.remove(&key) else {
            return;
        };
        self.rows.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
    }

    fn push(&mut self, vote: Vote) {
        self.index
            .insert((vote.issue_id, vote.user_id), self.rows.len());
        self.rows.push(vote);
    }
}

/// Vote store keeping one row per (issue, user)
#[derive(Default)]
pub struct InMemoryVoteStore {
    table: RwLock<VoteTable>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn upsert(
        &self,
        issue_id: IssueId,
        user_id: UserId,
        card: Card,
        now: DateTime<Utc>,
    ) -> Result<VoteWrite, StoreError> {
        let mut table = self.table.write().await;

        let existing = table.index.get(&(issue_id, user_id)).copied();
        if let Some(position) = existing {
            let row = &mut table.rows[position];
            let previous = row.clone();
            row.replace_card(card, now);
            return Ok(VoteWrite {
                vote: row.clone(),
                previous: Some(previous),
            });
        }

        let vote = Vote::new(issue_id, user_id, card, now);
        table.push(vote.clone());
        Ok(VoteWrite {
            vote,
            previous: None,
        })
    }

    async fn restore(&self, write: &VoteWrite) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;
        let key = (write.vote.issue_id, write.vote.user_id);

        let Some(position) = table.index.get(&key).copied() else {
            return Ok(false);
        };
        if table.rows[position] != write.vote {
            debug!(
                "Vote from user {} on issue {} was overwritten since, not reverting",
                key.1, key.0
            );
            return Ok(false);
        }

        match &write.previous {
            Some(previous) => table.rows[position] = previous.clone(),
            None => table.remove(key),
        }
        Ok(true)
    }

    async fn votes_for_issue(&self, issue_id: IssueId) -> Result<Vec<Vote>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|v| v.issue_id == issue_id)
            .cloned()
            .collect())
    }

    async fn find(&self, filter: &VoteFilter) -> Result<Vec<Vote>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repository::RepositoryRef;

/// One entry of the list-commits endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetails {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetails,
    pub repository: RepositoryRef,
    pub stats: Option<CommitStats>,
}

impl Commit {
    pub fn from_summary(summary: CommitSummary, repository: RepositoryRef) -> Self {
        Self {
            sha: summary.sha,
            commit: summary.commit,
            repository,
            stats: None,
        }
    }

    pub fn authored_at(&self) -> DateTime<Utc> {
        self.commit.author.date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommitStats {
    pub additions: u32,
    pub deletions: u32,
    pub total: u32,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repository::{Label, RepositoryRef};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<SearchItem>,
}

/// Issue or pull request as returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub repository_url: String,
    pub user: Option<ActorInfo>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub comments: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActorInfo {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// Fields of the single pull request endpoint that search does not return.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PullRequestDetail {
    pub merged_at: Option<DateTime<Utc>>,
    pub additions: Option<u32>,
    pub deletions: Option<u32>,
    pub changed_files: Option<u32>,
    pub commits: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
    pub repository: RepositoryRef,
    pub additions: u32,
    pub deletions: u32,
    pub changed_files: u32,
    pub commits: u32,
    pub comments: u32,
    pub user: ActorInfo,
    pub labels: Vec<Label>,
}

impl PullRequest {
    pub fn from_search(item: SearchItem, repository: RepositoryRef, detail: PullRequestDetail) -> Self {
        Self {
            id: item.id,
            number: item.number,
            title: item.title,
            state: item.state,
            created_at: item.created_at,
            updated_at: item.updated_at,
            closed_at: item.closed_at,
            merged_at: detail.merged_at,
            repository,
            additions: detail.additions.unwrap_or(0),
            deletions: detail.deletions.unwrap_or(0),
            changed_files: detail.changed_files.unwrap_or(0),
            commits: detail.commits.unwrap_or(0),
            comments: item.comments,
            user: item.user.unwrap_or_default(),
            labels: item.labels,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub repository: RepositoryRef,
    pub labels: Vec<Label>,
    pub comments: u32,
}

impl Issue {
    pub fn from_search(item: SearchItem, repository: RepositoryRef) -> Self {
        Self {
            id: item.id,
            number: item.number,
            title: item.title,
            state: item.state,
            created_at: item.created_at,
            updated_at: item.updated_at,
            closed_at: item.closed_at,
            repository,
            labels: item.labels,
            comments: item.comments,
        }
    }
}

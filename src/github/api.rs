use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    CommitSummary, ContributionsCollection, Contributor, GitHubUser, LanguageBytes,
    PullRequestDetail, Repository, SearchResponse,
};

#[derive(Debug, Clone)]
pub struct RepoListParams {
    pub sort: String,
    pub kind: String,
    pub page: u32,
    pub per_page: u32,
}

impl RepoListParams {
    /// Every repository visible to the token, most recently updated first.
    pub fn all_by_updated(page: u32, per_page: u32) -> Self {
        Self {
            sort: "updated".to_string(),
            kind: "all".to_string(),
            page,
            per_page,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub sort: String,
    pub order: String,
    pub per_page: u32,
}

impl SearchParams {
    pub fn newest_first(query: impl Into<String>, per_page: u32) -> Self {
        Self {
            query: query.into(),
            sort: "created".to_string(),
            order: "desc".to_string(),
            per_page,
        }
    }
}

/// The REST and GraphQL surface the collectors depend on.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn get_authenticated_user(&self) -> Result<GitHubUser>;

    /// One page of repositories for the authenticated identity.
    async fn list_repositories(&self, params: &RepoListParams) -> Result<Vec<Repository>>;

    async fn search_issues(&self, params: &SearchParams) -> Result<SearchResponse>;

    async fn get_pull_request(&self, owner: &str, repo: &str, number: u64)
        -> Result<PullRequestDetail>;

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        author: &str,
        per_page: u32,
    ) -> Result<Vec<CommitSummary>>;

    async fn list_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes>;

    async fn list_contributors(&self, owner: &str, repo: &str, per_page: u32)
        -> Result<Vec<Contributor>>;

    /// Trailing-year contribution calendar plus per-repository commit totals.
    async fn contributions_collection(&self, login: &str) -> Result<ContributionsCollection>;
}

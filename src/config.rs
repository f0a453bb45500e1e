use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub github_api_url: String,
    pub gemini_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .map_err(|_| Error::Config("GITHUB_TOKEN environment variable not set".to_string()))?;

        let github_api_url = env::var("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let gemini_api_key = non_empty_var("GEMINI_API_KEY");
        let anthropic_api_key = non_empty_var("ANTHROPIC_API_KEY");

        let concurrency_limit = env::var("CONCURRENCY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(5);

        Ok(Self {
            github_token,
            github_api_url,
            gemini_api_key,
            anthropic_api_key,
            concurrency_limit,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Limits applied by the collectors during one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    pub concurrency_limit: usize,
    pub repo_page_size: u32,
    pub search_page_size: u32,
    pub max_pull_requests: usize,
    pub recent_commit_repos: usize,
    pub commits_per_repo: u32,
    pub max_recent_commits: usize,
    pub collaborator_repos: usize,
    pub contributors_per_repo: u32,
    pub max_collaborators: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 5,
            repo_page_size: 100,
            search_page_size: 100,
            max_pull_requests: 50,
            recent_commit_repos: 10,
            commits_per_repo: 10,
            max_recent_commits: 50,
            collaborator_repos: 20,
            contributors_per_repo: 10,
            max_collaborators: 10,
        }
    }
}

impl From<&Config> for AggregationConfig {
    fn from(config: &Config) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit,
            ..Self::default()
        }
    }
}

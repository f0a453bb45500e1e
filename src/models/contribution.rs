use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::activity::{Issue, PullRequest};
use super::calendar::{ContributionCalendar, RepositoryContributions};
use super::commit::Commit;
use super::repository::Repository;
use super::stats::ContributionStats;
use super::timeline::TimelineEntry;
use super::user::GitHubUser;

/// Language name to cumulative byte count.
pub type LanguageBytes = HashMap<String, u64>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collaborator {
    pub login: String,
    pub avatar_url: String,
    pub contributions: u64,
}

/// Everything gathered and derived during one aggregation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionData {
    pub user: GitHubUser,
    pub repositories: Vec<Repository>,
    pub pull_requests: Vec<PullRequest>,
    pub issues: Vec<Issue>,
    pub recent_commits: Vec<Commit>,
    pub contribution_calendar: ContributionCalendar,
    pub repository_contributions: Vec<RepositoryContributions>,
    pub languages: LanguageBytes,
    pub stats: ContributionStats,
    pub timeline: Vec<TimelineEntry>,
    pub collaborators: Vec<Collaborator>,
    pub generated_at: DateTime<Utc>,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionStats {
    /// Calendar total for the trailing year, not the number of fetched commits.
    pub total_commits: u64,
    pub total_prs: usize,
    pub total_issues: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_watchers: u64,
    pub total_repositories: usize,
    pub lines_of_code: u64,
    pub top_languages: Vec<LanguageShare>,
    pub contribution_streak: u32,
    pub most_active_day: String,
    /// The platform exposes no hour-of-day data, so this is always `None`.
    pub most_active_hour: Option<u8>,
    pub contribution_score: u64,
    pub impact_score: u64,
    pub collaboration_score: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    pub percentage: u32,
}

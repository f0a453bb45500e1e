use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// `contributionsCollection` node of the GraphQL user query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
    #[serde(default)]
    pub commit_contributions_by_repository: Vec<RepositoryContributions>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    pub weeks: Vec<ContributionWeek>,
}

impl ContributionCalendar {
    /// Days in chronological order, oldest first.
    pub fn days(&self) -> impl DoubleEndedIterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|w| w.contribution_days.iter())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u32,
    pub date: NaiveDate,
    /// 0 = Sunday .. 6 = Saturday
    pub weekday: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryContributions {
    pub repository: ContributedRepository,
    pub contributions: TotalCount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributedRepository {
    pub name: String,
    pub owner: OwnerLogin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerLogin {
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: u64,
}

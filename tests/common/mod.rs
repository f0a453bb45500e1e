#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde_json::json;

use gitpulse::github::{PlatformApi, RepoListParams, SearchParams};
use gitpulse::models::{
    CommitSummary, ContributionCalendar, ContributionDay, ContributionWeek,
    ContributionsCollection, Contributor, GitHubUser, LanguageBytes, PullRequestDetail,
    Repository, SearchItem, SearchResponse,
};
use gitpulse::{Error, Result};

/// In-memory platform. Anything not configured answers with an error.
#[derive(Default)]
pub struct FakePlatform {
    pub repositories: Vec<Repository>,
    pub fail_repositories: bool,
    pub fail_pull_request_search: bool,
    pub fail_issue_search: bool,
    pub pull_request_items: Vec<SearchItem>,
    pub issue_items: Vec<SearchItem>,
    pub pull_request_details: HashMap<(String, u64), PullRequestDetail>,
    pub commits: HashMap<String, Vec<CommitSummary>>,
    pub languages: HashMap<String, LanguageBytes>,
    pub contributors: HashMap<String, Vec<Contributor>>,
    pub calendar: Option<ContributionsCollection>,
    pub calls: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            calendar: Some(contributions(calendar(&[1, 2, 3]))),
            ..Default::default()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn called_repos(&self, prefix: &str) -> HashSet<String> {
        self.calls_with_prefix(prefix)
            .into_iter()
            .map(|c| c[prefix.len()..].to_string())
            .collect()
    }
}

fn missing(what: String) -> Error {
    Error::GitHubApi(format!("{} not found", what))
}

#[async_trait]
impl PlatformApi for FakePlatform {
    async fn get_authenticated_user(&self) -> Result<GitHubUser> {
        Ok(user("octo"))
    }

    async fn list_repositories(&self, params: &RepoListParams) -> Result<Vec<Repository>> {
        self.record(format!("repos:{}", params.page));
        if self.fail_repositories {
            return Err(Error::GitHubApi("500 Internal Server Error".to_string()));
        }

        let start = ((params.page - 1) * params.per_page) as usize;
        Ok(self
            .repositories
            .iter()
            .skip(start)
            .take(params.per_page as usize)
            .cloned()
            .collect())
    }

    async fn search_issues(&self, params: &SearchParams) -> Result<SearchResponse> {
        self.record(format!("search:{}", params.query));
        let (items, fail) = if params.query.contains("is:pr") {
            (&self.pull_request_items, self.fail_pull_request_search)
        } else {
            (&self.issue_items, self.fail_issue_search)
        };
        if fail {
            return Err(Error::GitHubApi("422 Validation Failed".to_string()));
        }
        let items: Vec<_> = items.iter().take(params.per_page as usize).cloned().collect();

        Ok(SearchResponse {
            total_count: items.len() as u64,
            incomplete_results: false,
            items,
        })
    }

    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestDetail> {
        let full_name = format!("{}/{}", owner, repo);
        self.record(format!("pull:{}#{}", full_name, number));
        self.pull_request_details
            .get(&(full_name.clone(), number))
            .cloned()
            .ok_or_else(|| missing(format!("{}#{}", full_name, number)))
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        _author: &str,
        per_page: u32,
    ) -> Result<Vec<CommitSummary>> {
        let full_name = format!("{}/{}", owner, repo);
        self.record(format!("commits:{}", full_name));
        self.commits
            .get(&full_name)
            .map(|c| c.iter().take(per_page as usize).cloned().collect())
            .ok_or_else(|| missing(full_name))
    }

    async fn list_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        let full_name = format!("{}/{}", owner, repo);
        self.record(format!("languages:{}", full_name));
        self.languages
            .get(&full_name)
            .cloned()
            .ok_or_else(|| missing(full_name))
    }

    async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
    ) -> Result<Vec<Contributor>> {
        let full_name = format!("{}/{}", owner, repo);
        self.record(format!("contributors:{}", full_name));
        self.contributors
            .get(&full_name)
            .map(|c| c.iter().take(per_page as usize).cloned().collect())
            .ok_or_else(|| missing(full_name))
    }

    async fn contributions_collection(&self, _login: &str) -> Result<ContributionsCollection> {
        self.calendar
            .clone()
            .ok_or_else(|| Error::GraphQl("calendar unavailable".to_string()))
    }
}

pub fn user(login: &str) -> GitHubUser {
    serde_json::from_value(json!({
        "login": login,
        "id": 42,
        "name": "Octo Cat",
        "email": null,
        "avatar_url": "https://avatars.example.com/octo",
        "bio": "Writes code",
        "company": null,
        "location": null,
        "blog": null,
        "twitter_username": null,
        "hireable": null,
        "public_repos": 3,
        "followers": 10,
        "following": 2,
        "created_at": "2015-06-01T00:00:00Z",
        "updated_at": "2024-06-01T00:00:00Z"
    }))
    .unwrap()
}

/// Repository `owner/name` whose timestamps are `updated_day` days after 2024-01-01.
pub fn repository(full_name: &str, updated_day: i64, stars: u32, archived: bool) -> Repository {
    let (owner, name) = full_name.split_once('/').unwrap();
    let updated = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(updated_day);
    let id = updated_day as u64 + 1;

    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "full_name": full_name,
        "description": null,
        "language": null,
        "stargazers_count": stars,
        "forks_count": 1,
        "watchers_count": stars,
        "size": 10,
        "created_at": "2023-05-01T09:00:00Z",
        "updated_at": format!("{}T12:00:00Z", updated),
        "pushed_at": format!("{}T12:00:00Z", updated),
        "topics": [],
        "license": null,
        "archived": archived,
        "disabled": false,
        "private": false,
        "owner": { "login": owner }
    }))
    .unwrap()
}

pub fn search_item(full_name: &str, number: u64, created_at: &str, comments: u32) -> SearchItem {
    serde_json::from_value(json!({
        "id": number * 100,
        "number": number,
        "title": format!("Item {}", number),
        "state": "open",
        "created_at": created_at,
        "updated_at": created_at,
        "closed_at": null,
        "repository_url": format!("https://api.github.com/repos/{}", full_name),
        "user": { "login": "octo", "avatar_url": "" },
        "labels": [{ "name": "bug", "color": "d73a4a" }],
        "comments": comments
    }))
    .unwrap()
}

/// Search item whose repository URL has no `owner/name` tail.
pub fn search_item_with_bad_url(number: u64, created_at: &str) -> SearchItem {
    let mut item = search_item("octo/web", number, created_at, 0);
    item.repository_url = "not-a-repository-url".to_string();
    item
}

pub fn pull_detail(merged: bool) -> PullRequestDetail {
    PullRequestDetail {
        merged_at: merged.then(|| "2024-02-01T00:00:00Z".parse().unwrap()),
        additions: Some(10),
        deletions: Some(2),
        changed_files: Some(1),
        commits: Some(1),
    }
}

pub fn commit_summary(sha: &str, date: &str) -> CommitSummary {
    serde_json::from_value(json!({
        "sha": sha,
        "commit": {
            "message": format!("commit {}", sha),
            "author": { "name": "Octo", "email": "octo@example.com", "date": date }
        }
    }))
    .unwrap()
}

pub fn contributor(login: &str, contributions: u64) -> Contributor {
    Contributor {
        login: login.to_string(),
        avatar_url: format!("https://avatars.example.com/{}", login),
        contributions,
    }
}

pub fn languages(entries: &[(&str, u64)]) -> LanguageBytes {
    entries
        .iter()
        .map(|(name, bytes)| (name.to_string(), *bytes))
        .collect()
}

/// Consecutive days from 2024-01-07 (a Sunday), seven per week.
pub fn calendar(counts: &[u32]) -> ContributionCalendar {
    let start = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    let days: Vec<ContributionDay> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| ContributionDay {
            contribution_count: count,
            date: start + Duration::days(i as i64),
            weekday: (i % 7) as u8,
        })
        .collect();

    ContributionCalendar {
        total_contributions: counts.iter().map(|&c| c as u64).sum(),
        weeks: days
            .chunks(7)
            .map(|chunk| ContributionWeek {
                contribution_days: chunk.to_vec(),
            })
            .collect(),
    }
}

pub fn contributions(calendar: ContributionCalendar) -> ContributionsCollection {
    ContributionsCollection {
        contribution_calendar: calendar,
        commit_contributions_by_repository: Vec::new(),
    }
}

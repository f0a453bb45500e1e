use std::collections::HashMap;
use std::future::Future;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::config::AggregationConfig;
use crate::error::Result;
use crate::github::{Paginator, PlatformApi, RepoListParams, SearchParams};
use crate::models::{
    Collaborator, Commit, ContributionsCollection, Issue, LanguageBytes, PullRequest, Repository,
    RepositoryRef, SearchItem,
};

/// One method per entity class. Single-call collectors return `Result`; the per-repository
/// ones log failures and carry on with whatever succeeded.
pub struct Collectors<'a> {
    api: &'a dyn PlatformApi,
    config: &'a AggregationConfig,
}

impl<'a> Collectors<'a> {
    pub fn new(api: &'a dyn PlatformApi, config: &'a AggregationConfig) -> Self {
        Self { api, config }
    }

    pub async fn repositories(&self) -> Result<Vec<Repository>> {
        tracing::info!("Fetching repositories...");
        let api = self.api;
        let paginator = Paginator::new(self.config.repo_page_size);

        let repos = paginator
            .fetch_all(move |page, per_page| async move {
                api.list_repositories(&RepoListParams::all_by_updated(page, per_page))
                    .await
            })
            .await?;

        tracing::info!("Found {} repositories", repos.len());
        Ok(repos)
    }

    pub async fn pull_requests(&self, login: &str) -> Result<Vec<PullRequest>> {
        let params = SearchParams::newest_first(
            format!("is:pr author:{} is:public", login),
            self.config.search_page_size,
        );
        let response = self.api.search_issues(&params).await?;

        let items = response
            .items
            .into_iter()
            .take(self.config.max_pull_requests);
        let pull_requests: Vec<_> = self
            .bounded(items.map(|item| self.pull_request_with_detail(item)))
            .await
            .into_iter()
            .flatten()
            .collect();

        tracing::info!("Collected {} pull requests", pull_requests.len());
        Ok(pull_requests)
    }

    async fn pull_request_with_detail(&self, item: SearchItem) -> Option<PullRequest> {
        let Some(repository) = RepositoryRef::from_api_url(&item.repository_url) else {
            tracing::warn!("Skipping PR #{} with unrecognised repository URL {}", item.number, item.repository_url);
            return None;
        };

        match self
            .api
            .get_pull_request(&repository.owner, &repository.name, item.number)
            .await
        {
            Ok(detail) => Some(PullRequest::from_search(item, repository, detail)),
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch PR details for {}#{}: {}",
                    repository.full_name,
                    item.number,
                    e
                );
                None
            }
        }
    }

    pub async fn issues(&self, login: &str) -> Result<Vec<Issue>> {
        let params = SearchParams::newest_first(
            format!("is:issue author:{} is:public", login),
            self.config.search_page_size,
        );
        let response = self.api.search_issues(&params).await?;

        let issues: Vec<_> = response
            .items
            .into_iter()
            .filter_map(|item| match RepositoryRef::from_api_url(&item.repository_url) {
                Some(repository) => Some(Issue::from_search(item, repository)),
                None => {
                    tracing::warn!("Skipping issue #{} with unrecognised repository URL", item.number);
                    None
                }
            })
            .collect();

        tracing::info!("Collected {} issues", issues.len());
        Ok(issues)
    }

    /// Latest commits by `login` across the most recently updated active repositories.
    pub async fn recent_commits(&self, login: &str, repositories: &[Repository]) -> Vec<Commit> {
        let mut active: Vec<&Repository> = repositories.iter().filter(|r| r.is_active()).collect();
        active.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        active.truncate(self.config.recent_commit_repos);

        let mut commits: Vec<Commit> = self
            .bounded(active.into_iter().map(|repo| self.repository_commits(login, repo)))
            .await
            .into_iter()
            .flatten()
            .collect();

        commits.sort_by(|a, b| b.authored_at().cmp(&a.authored_at()));
        commits.truncate(self.config.max_recent_commits);

        tracing::info!("Collected {} recent commits", commits.len());
        commits
    }

    async fn repository_commits(&self, login: &str, repo: &Repository) -> Vec<Commit> {
        tracing::debug!("Fetching commits for: {}", repo.full_name);
        match self
            .api
            .list_commits(repo.owner_login(), &repo.name, login, self.config.commits_per_repo)
            .await
        {
            Ok(summaries) => summaries
                .into_iter()
                .map(|summary| Commit::from_summary(summary, repo.reference()))
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to fetch commits for {}: {}", repo.full_name, e);
                Vec::new()
            }
        }
    }

    pub async fn contribution_calendar(&self, login: &str) -> Result<ContributionsCollection> {
        let collection = self.api.contributions_collection(login).await?;
        tracing::info!(
            "Contribution calendar reports {} contributions",
            collection.contribution_calendar.total_contributions
        );
        Ok(collection)
    }

    /// Sums language bytes over every active repository.
    pub async fn language_bytes(&self, repositories: &[Repository]) -> LanguageBytes {
        let results = self
            .bounded(repositories.iter().filter(|r| r.is_active()).map(|repo| async move {
                let languages = self.api.list_languages(repo.owner_login(), &repo.name).await;
                (repo, languages)
            }))
            .await;

        let mut totals = LanguageBytes::new();
        for (repo, result) in results {
            match result {
                Ok(languages) => {
                    for (language, bytes) in languages {
                        *totals.entry(language).or_insert(0) += bytes;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch languages for {}: {}", repo.full_name, e);
                }
            }
        }

        tracing::info!("Collected byte counts for {} languages", totals.len());
        totals
    }

    /// Other people contributing to the first repositories, repository owners excluded.
    /// Repositories are visited one at a time.
    pub async fn collaborators(&self, repositories: &[Repository]) -> Vec<Collaborator> {
        let mut collaborators: Vec<Collaborator> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for repo in repositories.iter().take(self.config.collaborator_repos) {
            let owner = repo.owner_login();
            let contributors = match self
                .api
                .list_contributors(owner, &repo.name, self.config.contributors_per_repo)
                .await
            {
                Ok(contributors) => contributors,
                Err(e) => {
                    tracing::warn!("Failed to fetch contributors for {}: {}", repo.full_name, e);
                    continue;
                }
            };

            for contributor in contributors.into_iter().filter(|c| c.login != owner) {
                match index.get(&contributor.login) {
                    Some(&i) => {
                        let existing = &mut collaborators[i];
                        existing.contributions += contributor.contributions;
                        existing.avatar_url = contributor.avatar_url;
                    }
                    None => {
                        index.insert(contributor.login.clone(), collaborators.len());
                        collaborators.push(Collaborator {
                            login: contributor.login,
                            avatar_url: contributor.avatar_url,
                            contributions: contributor.contributions,
                        });
                    }
                }
            }
        }

        collaborators.sort_by(|a, b| b.contributions.cmp(&a.contributions));
        collaborators.truncate(self.config.max_collaborators);
        collaborators
    }

    /// Runs `tasks` with at most `concurrency_limit` in flight, keeping input order.
    async fn bounded<T, Fut>(&self, tasks: impl IntoIterator<Item = Fut>) -> Vec<T>
    where
        Fut: Future<Output = T>,
    {
        let semaphore = Semaphore::new(self.config.concurrency_limit.max(1));
        join_all(tasks.into_iter().map(|task| {
            let semaphore = &semaphore;
            async move {
                let _permit = semaphore.acquire().await;
                task.await
            }
        }))
        .await
    }
}

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::config::DEFAULT_API_URL;
use crate::error::{Error, Result};
use crate::github::api::{PlatformApi, RepoListParams, SearchParams};
use crate::github::rate_limiter::{RateLimitResource, RateLimiter};
use crate::models::{
    CommitSummary, ContributionsCollection, Contributor, GitHubUser, LanguageBytes,
    PullRequestDetail, Repository, SearchResponse,
};

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
            weekday
          }
        }
      }
      commitContributionsByRepository {
        repository {
          name
          owner {
            login
          }
        }
        contributions {
          totalCount
        }
      }
    }
  }
}
"#;

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct ContributionsQueryData {
    user: Option<ContributionsUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsUser {
    contributions_collection: ContributionsCollection,
}

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitpulse/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let resource = RateLimitResource::for_path(path);
        self.rate_limiter.check(resource).await?;
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        self.rate_limiter
            .update_from_headers(resource, response.headers())
            .await;

        self.decode(response, resource, &url).await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
        resource: RateLimitResource,
        url: &str,
    ) -> Result<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Unauthorized(body));
        }

        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            if let Some(secs) = self.rate_limiter.seconds_until_reset(resource).await {
                return Err(Error::RateLimited(secs));
            }
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Request to {} failed: {} - {}",
                url, status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PlatformApi for GitHubClient {
    async fn get_authenticated_user(&self) -> Result<GitHubUser> {
        tracing::info!("Fetching authenticated user");
        self.get_json("/user", &[]).await
    }

    async fn list_repositories(&self, params: &RepoListParams) -> Result<Vec<Repository>> {
        self.get_json(
            "/user/repos",
            &[
                ("sort", params.sort.clone()),
                ("type", params.kind.clone()),
                ("page", params.page.to_string()),
                ("per_page", params.per_page.to_string()),
            ],
        )
        .await
    }

    async fn search_issues(&self, params: &SearchParams) -> Result<SearchResponse> {
        self.get_json(
            "/search/issues",
            &[
                ("q", params.query.clone()),
                ("sort", params.sort.clone()),
                ("order", params.order.clone()),
                ("per_page", params.per_page.to_string()),
            ],
        )
        .await
    }

    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestDetail> {
        self.get_json(&format!("/repos/{}/{}/pulls/{}", owner, repo, number), &[])
            .await
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        author: &str,
        per_page: u32,
    ) -> Result<Vec<CommitSummary>> {
        self.get_json(
            &format!("/repos/{}/{}/commits", owner, repo),
            &[
                ("author", author.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )
        .await
    }

    async fn list_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        self.get_json(&format!("/repos/{}/{}/languages", owner, repo), &[])
            .await
    }

    async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
    ) -> Result<Vec<Contributor>> {
        let url = format!("{}/repos/{}/{}/contributors", self.base_url, owner, repo);
        self.rate_limiter.check(RateLimitResource::Core).await?;

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", per_page.to_string())])
            .send()
            .await?;
        self.rate_limiter
            .update_from_headers(RateLimitResource::Core, response.headers())
            .await;

        // Empty repositories answer 204 with no body.
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        self.decode(response, RateLimitResource::Core, &url).await
    }

    async fn contributions_collection(&self, login: &str) -> Result<ContributionsCollection> {
        self.rate_limiter.check(RateLimitResource::GraphQl).await?;
        let url = format!("{}/graphql", self.base_url);
        tracing::info!("Querying contribution calendar for {}", login);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "query": CONTRIBUTIONS_QUERY,
                "variables": { "login": login },
            }))
            .send()
            .await?;
        self.rate_limiter
            .update_from_headers(RateLimitResource::GraphQl, response.headers())
            .await;

        let body: GraphQlResponse<ContributionsQueryData> = self
            .decode(response, RateLimitResource::GraphQl, &url)
            .await?;

        if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GraphQl(messages.join("; ")));
        }

        body.data
            .and_then(|d| d.user)
            .map(|u| u.contributions_collection)
            .ok_or_else(|| Error::GraphQl(format!("No contribution data returned for {}", login)))
    }
}

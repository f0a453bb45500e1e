use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;
use tokio::sync::Mutex;

use crate::error::{Error, Result};

/// Quota buckets GitHub accounts separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitResource {
    Core,
    Search,
    GraphQl,
}

impl RateLimitResource {
    /// Value of the `x-ratelimit-resource` header. Buckets the client never calls map to `None`.
    pub fn from_header(value: &str) -> Option<Self> {
        match value {
            "core" => Some(Self::Core),
            "search" => Some(Self::Search),
            "graphql" => Some(Self::GraphQl),
            _ => None,
        }
    }

    /// Bucket a REST path is charged to.
    pub fn for_path(path: &str) -> Self {
        if path.starts_with("/search/") {
            Self::Search
        } else if path.starts_with("/graphql") {
            Self::GraphQl
        } else {
            Self::Core
        }
    }
}

/// Tracks the quotas GitHub reports in `x-ratelimit-*` headers, one per resource.
///
/// Requests are refused once their resource's quota is known to be spent; nothing here
/// waits or retries.
pub struct RateLimiter {
    quotas: Mutex<HashMap<RateLimitResource, Quota>>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Quota {
    remaining: Option<u32>,
    reset_at: Option<DateTime<Utc>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            quotas: Mutex::new(HashMap::new()),
        }
    }

    pub async fn check(&self, resource: RateLimitResource) -> Result<()> {
        match self.seconds_until_reset(resource).await {
            Some(secs) => Err(Error::RateLimited(secs)),
            None => Ok(()),
        }
    }

    /// `Some` while the resource's quota is exhausted and its reset lies in the future.
    pub async fn seconds_until_reset(&self, resource: RateLimitResource) -> Option<u64> {
        let quotas = self.quotas.lock().await;
        let quota = quotas.get(&resource)?;
        if quota.remaining != Some(0) {
            return None;
        }

        let secs = (quota.reset_at? - Utc::now()).num_seconds();
        (secs > 0).then_some(secs as u64)
    }

    pub async fn remaining(&self, resource: RateLimitResource) -> Option<u32> {
        self.quotas
            .lock()
            .await
            .get(&resource)
            .and_then(|q| q.remaining)
    }

    /// Records the quota of a response to a request made against `requested`.
    /// An `x-ratelimit-resource` header naming a known bucket takes precedence.
    pub async fn update_from_headers(&self, requested: RateLimitResource, headers: &HeaderMap) {
        let remaining = header_number::<u32>(headers, "x-ratelimit-remaining");
        let reset = header_number::<i64>(headers, "x-ratelimit-reset")
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single());

        if remaining.is_none() && reset.is_none() {
            return;
        }

        let resource = headers
            .get("x-ratelimit-resource")
            .and_then(|v| v.to_str().ok())
            .and_then(RateLimitResource::from_header)
            .unwrap_or(requested);

        let mut quotas = self.quotas.lock().await;
        let quota = quotas.entry(resource).or_default();
        if remaining.is_some() {
            quota.remaining = remaining;
        }
        if reset.is_some() {
            quota.reset_at = reset;
        }

        if quota.remaining == Some(0) {
            tracing::warn!(
                "GitHub {:?} rate limit exhausted, resets at {:?}",
                resource,
                quota.reset_at
            );
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    use super::RateLimitResource::{Core, GraphQl, Search};

    fn headers(remaining: &str, reset: i64) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_str(remaining).unwrap());
        headers.insert(
            "x-ratelimit-reset",
            HeaderValue::from_str(&reset.to_string()).unwrap(),
        );
        headers
    }

    fn headers_for(resource: &str, remaining: &str, reset: i64) -> HeaderMap {
        let mut headers = headers(remaining, reset);
        headers.insert("x-ratelimit-resource", HeaderValue::from_str(resource).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_unknown_quota_allows_requests() {
        let limiter = RateLimiter::new();
        assert!(limiter.check(Core).await.is_ok());
        assert_eq!(limiter.remaining(Core).await, None);
    }

    #[tokio::test]
    async fn test_exhausted_quota_refuses() {
        let limiter = RateLimiter::new();
        let reset = Utc::now().timestamp() + 120;
        limiter.update_from_headers(Core, &headers("0", reset)).await;

        match limiter.check(Core).await {
            Err(Error::RateLimited(secs)) => assert!(secs > 0 && secs <= 120),
            other => panic!("expected rate limit error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_past_reset_allows_requests() {
        let limiter = RateLimiter::new();
        let reset = Utc::now().timestamp() - 5;
        limiter.update_from_headers(Core, &headers("0", reset)).await;

        assert!(limiter.check(Core).await.is_ok());
    }

    #[tokio::test]
    async fn test_remaining_quota_allows_requests() {
        let limiter = RateLimiter::new();
        let reset = Utc::now().timestamp() + 120;
        limiter.update_from_headers(Core, &headers("42", reset)).await;

        assert!(limiter.check(Core).await.is_ok());
        assert_eq!(limiter.remaining(Core).await, Some(42));
    }

    #[tokio::test]
    async fn test_spent_search_quota_leaves_core_open() {
        let limiter = RateLimiter::new();
        let reset = Utc::now().timestamp() + 50;
        limiter
            .update_from_headers(Core, &headers_for("core", "4990", reset))
            .await;
        limiter
            .update_from_headers(Search, &headers_for("search", "0", reset))
            .await;

        assert!(limiter.check(Core).await.is_ok());
        assert!(limiter.check(GraphQl).await.is_ok());
        assert!(matches!(limiter.check(Search).await, Err(Error::RateLimited(_))));
        assert_eq!(limiter.remaining(Core).await, Some(4990));
    }

    #[tokio::test]
    async fn test_resource_header_overrides_requested_bucket() {
        let limiter = RateLimiter::new();
        let reset = Utc::now().timestamp() + 50;
        limiter
            .update_from_headers(Core, &headers_for("search", "0", reset))
            .await;

        assert!(limiter.check(Core).await.is_ok());
        assert!(limiter.check(Search).await.is_err());
    }

    #[tokio::test]
    async fn test_unrecognised_resource_falls_back_to_requested() {
        let limiter = RateLimiter::new();
        let reset = Utc::now().timestamp() + 50;
        limiter
            .update_from_headers(GraphQl, &headers_for("integration_manifest", "0", reset))
            .await;

        assert!(limiter.check(GraphQl).await.is_err());
        assert!(limiter.check(Core).await.is_ok());
    }

    #[test]
    fn test_resource_for_path() {
        assert_eq!(RateLimitResource::for_path("/search/issues"), Search);
        assert_eq!(RateLimitResource::for_path("/graphql"), GraphQl);
        assert_eq!(RateLimitResource::for_path("/repos/octo/web/languages"), Core);
        assert_eq!(RateLimitResource::for_path("/user"), Core);
    }
}

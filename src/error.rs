use thiserror::Error;

/// Failures surfaced by the platform client, the aggregation pipeline and the insight providers.
///
/// Collectors that work per repository or per item log these and carry on; the user, repository
/// list, searches and calendar return them from `AggregationPipeline::aggregate`.
#[derive(Error, Debug)]
pub enum Error {
    /// Non-success REST status other than 401 or an exhausted quota.
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("GitHub rejected the token: {0}")]
    Unauthorized(String),

    /// Quota for the request's resource is spent; carries seconds until it resets.
    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    /// `errors` in a GraphQL response, or a response with no user data.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Any insight provider failure. The insight generator replaces it with the rule set.
    #[error("LLM API error: {0}")]
    LLMApi(String),

    /// Model reply without a usable insight array.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Rate limits and transport failures, where the CLI suggests running again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited(_) | Error::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_variants() {
        assert!(Error::RateLimited(30).is_retryable());
        assert!(!Error::Unauthorized("bad credentials".to_string()).is_retryable());
        assert!(!Error::GitHubApi("404 Not Found".to_string()).is_retryable());
        assert!(!Error::GraphQl("user not found".to_string()).is_retryable());
    }
}

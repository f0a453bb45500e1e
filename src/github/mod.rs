pub mod api;
pub mod client;
pub mod rate_limiter;
pub mod paginator;

pub use api::{PlatformApi, RepoListParams, SearchParams};
pub use client::GitHubClient;
pub use rate_limiter::{RateLimitResource, RateLimiter};
pub use paginator::Paginator;

pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod llm;
pub mod analysis;

pub use config::{AggregationConfig, Config};
pub use error::{Error, Result};
pub use github::{GitHubClient, PlatformApi};
pub use llm::{ClaudeProvider, GeminiProvider, InsightGenerator, TextGenerator};
pub use analysis::AggregationPipeline;

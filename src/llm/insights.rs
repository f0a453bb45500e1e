use std::sync::Arc;

use crate::llm::fallback::fallback_insights;
use crate::llm::parser::parse_insights;
use crate::llm::prompts::InsightRequest;
use crate::llm::provider::TextGenerator;
use crate::models::{ContributionData, Insight};

/// Asks the configured model for insights and falls back to the rule set on any failure.
pub struct InsightGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl InsightGenerator {
    pub fn new(generator: impl TextGenerator + 'static) -> Self {
        Self {
            generator: Some(Arc::new(generator)),
        }
    }

    /// Only the rule-based insights.
    pub fn offline() -> Self {
        Self { generator: None }
    }

    pub async fn generate(&self, data: &ContributionData) -> Vec<Insight> {
        let Some(generator) = &self.generator else {
            return fallback_insights(&data.stats);
        };

        let prompt = InsightRequest::from_data(data).to_prompt();
        let result = match generator.generate(&prompt).await {
            Ok(text) => parse_insights(&text),
            Err(e) => Err(e),
        };

        match result {
            Ok(insights) => {
                tracing::info!("{} returned {} insights", generator.name(), insights.len());
                insights
            }
            Err(e) => {
                tracing::warn!("Insight generation with {} failed, using fallback: {}", generator.name(), e);
                fallback_insights(&data.stats)
            }
        }
    }
}

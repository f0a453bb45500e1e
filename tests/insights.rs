mod common;

use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use common::FakePlatform;
use gitpulse::models::{ContributionData, InsightKind};
use gitpulse::{AggregationConfig, AggregationPipeline, Error, InsightGenerator, Result, TextGenerator};

/// Answers every prompt with the same canned reply, or fails when there is none.
struct ScriptedGenerator {
    reply: Option<String>,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        assert!(prompt.contains("Profile: Octo Cat"));
        self.reply
            .clone()
            .ok_or_else(|| Error::LLMApi("503 Service Unavailable".to_string()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

async fn sample_data() -> ContributionData {
    AggregationPipeline::from_shared(Arc::new(FakePlatform::new()), AggregationConfig::default())
        .aggregate()
        .await
        .unwrap()
}

fn kinds_and_titles(generated: &[gitpulse::models::Insight]) -> Vec<(InsightKind, String)> {
    generated
        .iter()
        .map(|i| (i.kind, i.title.clone()))
        .collect()
}

fn fallback_expectation() -> Vec<(InsightKind, String)> {
    vec![
        (InsightKind::Opportunity, "Increase Collaboration".to_string()),
        (InsightKind::Trend, "Peak Activity on Tuesday".to_string()),
    ]
}

#[tokio::test]
async fn test_model_reply_is_used_when_valid() {
    let data = sample_data().await;
    let reply = r#"Here you go:
```json
[
  {"type": "skill", "title": "Rust focus", "description": "Most bytes are Rust.", "confidence": 0.8, "actionable": false},
  {"type": "nonsense", "title": "Dropped", "description": "Unknown kind.", "confidence": 0.1, "actionable": false},
  {"type": "trend", "title": "Steady", "description": "Three active days in a row.", "confidence": 0.7, "actionable": true}
]
```"#;
    let generator = InsightGenerator::new(ScriptedGenerator {
        reply: Some(reply.to_string()),
    });

    let generated = generator.generate(&data).await;

    assert_eq!(
        kinds_and_titles(&generated),
        vec![
            (InsightKind::Skill, "Rust focus".to_string()),
            (InsightKind::Trend, "Steady".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unparseable_reply_falls_back_to_rules() {
    let data = sample_data().await;
    let generator = InsightGenerator::new(ScriptedGenerator {
        reply: Some("I could not find anything interesting.".to_string()),
    });

    let generated = generator.generate(&data).await;

    assert_eq!(kinds_and_titles(&generated), fallback_expectation());
}

#[tokio::test]
async fn test_provider_error_falls_back_to_rules() {
    let data = sample_data().await;
    let generator = InsightGenerator::new(ScriptedGenerator { reply: None });

    let generated = generator.generate(&data).await;

    assert_eq!(kinds_and_titles(&generated), fallback_expectation());
}

#[tokio::test]
async fn test_offline_generator_uses_rules() {
    let data = sample_data().await;

    let generated = InsightGenerator::offline().generate(&data).await;

    assert_eq!(kinds_and_titles(&generated), fallback_expectation());
}

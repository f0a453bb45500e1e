use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::llm::prompts::SYSTEM_PROMPT;
use crate::llm::provider::{http_client, non_empty_text, send_json, TextGenerator};

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Google Gemini `generateContent`.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl Content {
    fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

/// Text of the first candidate only.
fn first_candidate_text(response: &GenerateResponse) -> Result<String> {
    let parts = response
        .candidates
        .first()
        .map(|c| c.content.parts.as_slice())
        .unwrap_or_default();

    non_empty_text(parts.iter().filter_map(|p| p.text.as_deref()), "Gemini")
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Sending {} prompt characters to Gemini", prompt.len());

        let body = GenerateRequest {
            system_instruction: Content::text(SYSTEM_PROMPT),
            contents: vec![Content::text(prompt)],
        };

        let request = self
            .client
            .post(format!("{}/{}:generateContent", API_BASE, self.model))
            .query(&[("key", &self.api_key)])
            .json(&body);

        let response: GenerateResponse = send_json(request, self.name()).await?;
        first_candidate_text(&response)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}

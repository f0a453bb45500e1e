use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::llm::prompts::SYSTEM_PROMPT;
use crate::llm::provider::{http_client, non_empty_text, send_json, TextGenerator};

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;

/// Anthropic Messages API.
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl ClaudeProvider {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

fn reply_text(response: &MessagesResponse) -> Result<String> {
    if let Some(error) = &response.error {
        return Err(Error::LLMApi(error.message.clone()));
    }

    non_empty_text(
        response
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str()),
        "Claude",
    )
}

#[async_trait]
impl TextGenerator for ClaudeProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Sending {} prompt characters to Claude", prompt.len());

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let response: MessagesResponse = send_json(request, self.name()).await?;
        reply_text(&response)
    }

    fn name(&self) -> &str {
        "Claude"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_text_joins_text_blocks() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content": [
                {"type": "text", "text": "[{\"type\":"},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "\"skill\"}]"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(reply_text(&response).unwrap(), r#"[{"type":"skill"}]"#);
    }

    #[test]
    fn test_reply_text_surfaces_api_error() {
        let response: MessagesResponse =
            serde_json::from_str(r#"{"error": {"type": "overloaded_error", "message": "Overloaded"}}"#)
                .unwrap();

        assert!(matches!(reply_text(&response), Err(Error::LLMApi(m)) if m == "Overloaded"));
    }

    #[test]
    fn test_reply_text_rejects_empty_content() {
        let response: MessagesResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(reply_text(&response).is_err());
    }
}

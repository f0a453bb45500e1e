use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A model that turns a prompt into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
    fn name(&self) -> &str;
}

pub(crate) fn http_client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Sends a prepared request and decodes the body, folding every failure into `Error::LLMApi`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    provider: &str,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::LLMApi(format!("{} request failed: {}", provider, e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::LLMApi(format!("{} API error ({}): {}", provider, status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| Error::LLMApi(format!("Failed to decode {} response: {}", provider, e)))
}

/// Concatenates text fragments, treating an empty result as a failed generation.
pub(crate) fn non_empty_text<'a>(
    fragments: impl IntoIterator<Item = &'a str>,
    provider: &str,
) -> Result<String> {
    let text: String = fragments.into_iter().collect();
    if text.trim().is_empty() {
        return Err(Error::LLMApi(format!("{} returned no text", provider)));
    }
    Ok(text)
}

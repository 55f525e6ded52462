use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const API_VERSION: &str = "2023-06-01";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one prompt and returns the generated text. Never retries.
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: Option<String>,
}

/// Client for a messages-style text completion endpoint.
pub struct MessagesCompletionClient {
    client: reqwest::Client,
    api_url: String,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
}

impl MessagesCompletionClient {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: SecretString,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            config.completion_api_url.clone(),
            config.completion_api_key.clone(),
            config.completion_model.clone(),
            config.completion_max_tokens,
        )
    }
}

#[async_trait]
impl CompletionClient for MessagesCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        log::info!(
            "Requesting completion from {} ({} prompt chars)",
            self.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ProviderErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("API Error: {}", status.as_u16()));
            log::error!("Completion request failed with status {}: {}", status, message);
            return Err(AppError::ProviderError(message));
        }

        let body: MessagesResponse = response.json().await.map_err(|e| {
            AppError::ProviderError(format!("Unreadable completion response: {}", e))
        })?;

        collect_text(body)
    }
}

fn collect_text(body: MessagesResponse) -> AppResult<String> {
    if let Some(error) = body.error {
        return Err(AppError::ProviderError(
            error
                .message
                .unwrap_or_else(|| "API error occurred".to_string()),
        ));
    }

    let text = body
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        return Err(AppError::EmptyResponse(
            "completion contained no text segments".to_string(),
        ));
    }
    Ok(text)
}

//! HTTP client for OpenAI-compatible chat-completions endpoints.

use super::{ChatBackend, ProviderConfig};
use crate::error::{Result, SummarizerError};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Longest error body echoed back in a provider error.
const MAX_ERROR_BODY: usize = 500;

/// Chat backend talking to `{base_url}/chat/completions`.
///
/// The same client serves OpenAI, OpenRouter and local servers; they differ
/// only in their [`ProviderConfig`].
pub struct ProviderClient {
    config: ProviderConfig,
    http: reqwest::Client,
    timeout: Duration,
}

impl ProviderClient {
    /// Create a client for a resolved provider.
    ///
    /// Fails with `Authentication` when the provider needs a key and the
    /// config has no usable one. No request is sent.
    pub fn new(config: ProviderConfig, timeout: Duration) -> Result<Self> {
        config.check_credentials("")?;

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|_| {
                SummarizerError::Authentication(format!(
                    "API key for {} is not a valid header value",
                    config.name
                ))
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in &config.extra_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                SummarizerError::Config(format!("Invalid header name '{}'", name))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                SummarizerError::Config(format!("Invalid value for header '{}'", name))
            })?;
            headers.insert(header_name, header_value);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            config,
            http,
            timeout,
        })
    }

    /// Build the JSON request body, with the provider's `extra_body` merged in.
    pub fn build_request_body(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<serde_json::Value> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(|e| SummarizerError::provider(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| SummarizerError::provider(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .build()
            .map_err(|e| SummarizerError::provider(e.to_string()))?;

        let mut body = serde_json::to_value(&request)?;
        if let Some(object) = body.as_object_mut() {
            for (key, value) in &self.config.extra_body {
                object.insert(key.clone(), value.clone());
            }
        }
        Ok(body)
    }

    /// Extract the first choice's text from a successful response body.
    pub fn parse_response(body: &str) -> Result<String> {
        let response: CompletionResponse = serde_json::from_str(body)
            .map_err(|e| SummarizerError::provider(format!("Malformed response: {}", e)))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(SummarizerError::provider("Empty response from model"));
        }
        Ok(content)
    }

    /// Turn a non-2xx response into a provider error carrying the status.
    pub fn error_from_status(status: u16, body: &str) -> SummarizerError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "no response body".to_string()
                } else {
                    trimmed.chars().take(MAX_ERROR_BODY).collect()
                }
            });

        SummarizerError::Provider {
            status: Some(status),
            message,
        }
    }
}

#[async_trait]
impl ChatBackend for ProviderClient {
    fn provider_name(&self) -> &str {
        &self.config.name
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    #[instrument(skip_all, fields(provider = %self.config.name, model = %self.config.model))]
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let body = self.build_request_body(system_prompt, user_prompt)?;
        let url = self.config.completions_url();
        debug!("POST {}", url);

        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                SummarizerError::provider(format!(
                    "request timed out after {}s",
                    self.timeout.as_secs()
                ))
            } else {
                SummarizerError::provider(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SummarizerError::provider(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Self::error_from_status(status.as_u16(), &text));
        }

        Self::parse_response(&text)
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

//! AI chat-completion providers.
//!
//! Every backend speaks the OpenAI chat-completions protocol. Backends differ
//! only in configuration data (base URL, headers, default model, whether a
//! key is needed), so a single [`ProviderClient`] serves all of them.

mod client;
mod config;

pub use client::ProviderClient;
pub use config::{ProviderConfig, ProviderOverrides};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Kind of AI backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// api.openai.com or any OpenAI-compatible endpoint.
    #[serde(rename = "openai")]
    OpenAiCompatible,
    #[serde(rename = "openrouter")]
    OpenRouter,
    /// Local inference server (Ollama, llama.cpp, LM Studio).
    #[serde(rename = "local")]
    Local,
}

impl ProviderKind {
    /// Infer the kind from a provider name when the config does not say.
    pub fn infer(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "openrouter" => ProviderKind::OpenRouter,
            "ollama" | "local" | "lmstudio" | "llamacpp" => ProviderKind::Local,
            _ => ProviderKind::OpenAiCompatible,
        }
    }

    /// Endpoint used when the config gives no base URL.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAiCompatible => "https://api.openai.com/v1",
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
            ProviderKind::Local => "http://localhost:11434/v1",
        }
    }

    /// Local servers accept unauthenticated requests.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderKind::Local)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAiCompatible => write!(f, "openai"),
            ProviderKind::OpenRouter => write!(f, "openrouter"),
            ProviderKind::Local => write!(f, "local"),
        }
    }
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Configured provider name (e.g. "openrouter").
    fn provider_name(&self) -> &str;

    /// Model requests are sent to.
    fn model(&self) -> &str;

    /// Send a system prompt and a user prompt, returning the generated text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_kind() {
        assert_eq!(ProviderKind::infer("openrouter"), ProviderKind::OpenRouter);
        assert_eq!(ProviderKind::infer("Ollama"), ProviderKind::Local);
        assert_eq!(ProviderKind::infer("groq"), ProviderKind::OpenAiCompatible);
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: ProviderKind = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(kind, ProviderKind::Local);
        assert_eq!(
            serde_json::to_string(&ProviderKind::OpenAiCompatible).unwrap(),
            "\"openai\""
        );
    }
}

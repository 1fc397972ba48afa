//! Resolution of the provider used for a run.

use super::ProviderKind;
use crate::config::Settings;
use crate::error::{Result, SummarizerError};
use std::collections::BTreeMap;

/// Values given explicitly by the caller (CLI flags, `AI_PROVIDER`, `AI_MODEL`).
#[derive(Debug, Clone, Default)]
pub struct ProviderOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

/// Fully resolved, immutable provider configuration.
#[derive(Clone)]
pub struct ProviderConfig {
    pub name: String,
    pub kind: ProviderKind,
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub extra_headers: BTreeMap<String, String>,
    pub extra_body: serde_json::Map<String, serde_json::Value>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ProviderConfig {
    /// Resolve the provider from overrides and settings.
    ///
    /// `lookup_env` reads the provider's API-key variable. A provider that
    /// needs a key but has none (or an unusable one) fails with
    /// `Authentication` here, before any request is made.
    pub fn resolve(
        settings: &Settings,
        overrides: &ProviderOverrides,
        lookup_env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let name = non_empty(overrides.provider.as_deref())
            .unwrap_or_else(|| settings.default_provider.clone());
        let provider = settings.provider(&name)?;
        let kind = provider.kind.unwrap_or_else(|| ProviderKind::infer(&name));

        let model = non_empty(overrides.model.as_deref())
            .or_else(|| non_empty(Some(provider.default_model.as_str())))
            .ok_or_else(|| {
                SummarizerError::Config(format!("No model configured for provider '{}'", name))
            })?;

        let api_key = non_empty(overrides.api_key.as_deref()).or_else(|| {
            if provider.api_key_env.is_empty() {
                None
            } else {
                non_empty(lookup_env(&provider.api_key_env).as_deref())
            }
        });

        let config = Self {
            base_url: provider
                .base_url
                .as_deref()
                .and_then(|u| non_empty(Some(u)))
                .unwrap_or_else(|| kind.default_base_url().to_string())
                .trim_end_matches('/')
                .to_string(),
            name,
            kind,
            api_key,
            model,
            extra_headers: provider.extra_headers.clone(),
            extra_body: provider.extra_body.clone(),
        };
        config.check_credentials(&provider.api_key_env)?;
        Ok(config)
    }

    /// Verify that a usable API key is present when the backend needs one.
    pub fn check_credentials(&self, api_key_env: &str) -> Result<()> {
        match &self.api_key {
            None if self.kind.requires_api_key() => {
                let hint = if api_key_env.is_empty() {
                    "pass --api-key".to_string()
                } else {
                    format!("set {} or pass --api-key", api_key_env)
                };
                Err(SummarizerError::Authentication(format!(
                    "API key required for {}: {}",
                    self.name, hint
                )))
            }
            Some(key) if key.chars().any(|c| c.is_whitespace() || c.is_control()) => {
                Err(SummarizerError::Authentication(format!(
                    "API key for {} contains whitespace or control characters",
                    self.name
                )))
            }
            _ => Ok(()),
        }
    }

    /// URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::default();
        let config = ProviderConfig::resolve(
            &settings,
            &ProviderOverrides::default(),
            env(&[("OPENROUTER_API_KEY", "sk-or-123")]),
        )
        .unwrap();

        assert_eq!(config.name, "openrouter");
        assert_eq!(config.kind, ProviderKind::OpenRouter);
        assert_eq!(config.model, "openai/gpt-oss-20b:free");
        assert_eq!(config.api_key.as_deref(), Some("sk-or-123"));
        assert_eq!(config.completions_url(), "https://openrouter.ai/api/v1/chat/completions");
        assert!(config.extra_headers.contains_key("X-Title"));
        assert_eq!(
            config.extra_headers.get("HTTP-Referer").map(String::as_str),
            Some("https://nichsedge.github.io/digital-garden")
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let settings = Settings::default();
        let overrides = ProviderOverrides {
            provider: Some("openai".to_string()),
            model: Some("gpt-4o-mini".to_string()),
            api_key: Some("sk-flag".to_string()),
        };
        let config =
            ProviderConfig::resolve(&settings, &overrides, env(&[("OPENAI_API_KEY", "sk-env")]))
                .unwrap();

        assert_eq!(config.name, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key.as_deref(), Some("sk-flag"));
        assert_eq!(config.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_missing_api_key_is_authentication_error() {
        let settings = Settings::default();
        let overrides = ProviderOverrides {
            provider: Some("openai".to_string()),
            ..Default::default()
        };

        let err = ProviderConfig::resolve(&settings, &overrides, env(&[])).unwrap_err();
        assert!(matches!(err, SummarizerError::Authentication(ref m) if m.contains("OPENAI_API_KEY")));

        let err =
            ProviderConfig::resolve(&settings, &overrides, env(&[("OPENAI_API_KEY", "   ")]))
                .unwrap_err();
        assert!(matches!(err, SummarizerError::Authentication(_)));
    }

    #[test]
    fn test_invalid_api_key_is_authentication_error() {
        let settings = Settings::default();
        let overrides = ProviderOverrides {
            provider: Some("openai".to_string()),
            api_key: Some("sk-abc def".to_string()),
            ..Default::default()
        };
        let err = ProviderConfig::resolve(&settings, &overrides, env(&[])).unwrap_err();
        assert!(matches!(err, SummarizerError::Authentication(_)));
    }

    #[test]
    fn test_local_provider_needs_no_key() {
        let settings = Settings::default();
        let overrides = ProviderOverrides {
            provider: Some("ollama".to_string()),
            ..Default::default()
        };
        let config = ProviderConfig::resolve(&settings, &overrides, env(&[])).unwrap();
        assert_eq!(config.kind, ProviderKind::Local);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let settings = Settings::default();
        let overrides = ProviderOverrides {
            provider: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ProviderConfig::resolve(&settings, &overrides, env(&[])),
            Err(SummarizerError::Config(_))
        ));
    }
}

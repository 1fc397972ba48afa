//! Configuration settings for ytsum.

use crate::error::{Result, SummarizerError};
use crate::provider::ProviderKind;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use super::prompts::{DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT_TEMPLATE};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Provider used when neither `--provider` nor `AI_PROVIDER` is given.
    pub default_provider: String,
    /// Configured AI backends, keyed by name.
    pub providers: BTreeMap<String, ProviderSettings>,
    pub processing: ProcessingSettings,
    pub output: OutputSettings,
    /// System prompt sent with every chunk.
    pub system_prompt: String,
    /// User prompt template; see [`crate::config::Prompts`] for variables.
    pub user_prompt_template: String,
    /// Custom variables available in prompts as {{variable_name}}.
    pub prompt_variables: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(
            "openai".to_string(),
            ProviderSettings {
                kind: Some(ProviderKind::OpenAiCompatible),
                default_model: "gpt-3.5-turbo".to_string(),
                base_url: None,
                api_key_env: "OPENAI_API_KEY".to_string(),
                extra_headers: BTreeMap::new(),
                extra_body: serde_json::Map::new(),
            },
        );
        providers.insert(
            "openrouter".to_string(),
            ProviderSettings {
                kind: Some(ProviderKind::OpenRouter),
                default_model: "openai/gpt-oss-20b:free".to_string(),
                base_url: Some("https://openrouter.ai/api/v1".to_string()),
                api_key_env: "OPENROUTER_API_KEY".to_string(),
                extra_headers: BTreeMap::from([
                    (
                        "HTTP-Referer".to_string(),
                        "https://nichsedge.github.io/digital-garden".to_string(),
                    ),
                    ("X-Title".to_string(), "Youtube Summarizer".to_string()),
                ]),
                extra_body: serde_json::Map::new(),
            },
        );
        providers.insert(
            "ollama".to_string(),
            ProviderSettings {
                kind: Some(ProviderKind::Local),
                default_model: "llama3.2:3b".to_string(),
                base_url: Some("http://localhost:11434/v1".to_string()),
                api_key_env: "OLLAMA_API_KEY".to_string(),
                extra_headers: BTreeMap::new(),
                extra_body: serde_json::Map::new(),
            },
        );

        Self {
            default_provider: "openrouter".to_string(),
            providers,
            processing: ProcessingSettings::default(),
            output: OutputSettings::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_prompt_template: DEFAULT_USER_PROMPT_TEMPLATE.to_string(),
            prompt_variables: HashMap::new(),
        }
    }
}

/// Settings for a single AI provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderSettings {
    /// Backend kind. Inferred from the provider name when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProviderKind>,
    /// Model used when neither `--model` nor `AI_MODEL` is given.
    pub default_model: String,
    /// API base URL. Falls back to the kind's default endpoint.
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Additional HTTP headers sent with every request.
    pub extra_headers: BTreeMap<String, String>,
    /// Additional JSON fields merged into every request body.
    pub extra_body: serde_json::Map<String, serde_json::Value>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: None,
            default_model: String::new(),
            base_url: None,
            api_key_env: String::new(),
            extra_headers: BTreeMap::new(),
            extra_body: serde_json::Map::new(),
        }
    }
}

/// Settings for transcript processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingSettings {
    /// Upper bound on the estimated token count of a chunk.
    pub max_tokens_per_chunk: usize,
    /// Subtitle languages to try, in order.
    pub language_priority: Vec<String>,
    /// Try manually-created subtitles before auto-generated ones.
    pub prefer_manual_transcripts: bool,
    /// Timeout for a single provider request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            max_tokens_per_chunk: 3000,
            language_priority: vec!["en".to_string()],
            prefer_manual_transcripts: true,
            request_timeout_secs: 300,
        }
    }
}

/// Settings for output generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory summaries are written to.
    pub output_dir: String,
    /// Create the output directory if it does not exist.
    pub create_dir_if_missing: bool,
    /// chrono format string for the generation timestamp.
    pub date_format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: "./output".to_string(),
            create_dir_if_missing: true,
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// A path that does not exist yields the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content).map_err(|e| match e {
                SummarizerError::Config(msg) => {
                    SummarizerError::Config(format!("{}: {}", config_path.display(), msg))
                }
                other => other,
            })
        } else {
            Ok(Settings::default())
        }
    }

    /// Parse settings from a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(content)
            .map_err(|e| SummarizerError::Config(format!("malformed config: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a specific path as pretty-printed JSON.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytsum")
            .join("config.json")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.output.output_dir)
    }

    /// Get settings for a specific provider.
    pub fn provider(&self, name: &str) -> Result<&ProviderSettings> {
        self.providers.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.providers.keys().map(String::as_str).collect();
            SummarizerError::Config(format!(
                "Provider '{}' not configured (available: {})",
                name,
                known.join(", ")
            ))
        })
    }

    fn validate(&self) -> Result<()> {
        if self.processing.max_tokens_per_chunk == 0 {
            return Err(SummarizerError::Config(
                "processing.max_tokens_per_chunk must be greater than zero".to_string(),
            ));
        }
        if self.processing.language_priority.is_empty() {
            return Err(SummarizerError::Config(
                "processing.language_priority must list at least one language".to_string(),
            ));
        }
        if StrftimeItems::new(&self.output.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(SummarizerError::Config(format!(
                "output.date_format '{}' is not a valid strftime format",
                self.output.date_format
            )));
        }
        Ok(())
    }
}

//! List-providers command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::provider::ProviderKind;

/// Print the configured providers.
pub fn run_list_providers(settings: &Settings) {
    Output::header("Configured providers");

    for (name, provider) in &settings.providers {
        let kind = provider.kind.unwrap_or_else(|| ProviderKind::infer(name));
        let marker = if *name == settings.default_provider {
            " (default)"
        } else {
            ""
        };
        println!();
        Output::list_item(&format!("{}{}", name, marker));
        Output::kv("kind", &kind.to_string());
        Output::kv("default model", &provider.default_model);
        Output::kv(
            "base url",
            provider
                .base_url
                .as_deref()
                .unwrap_or_else(|| kind.default_base_url()),
        );

        if !provider.api_key_env.is_empty() {
            let key_set = std::env::var(&provider.api_key_env)
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false);
            let status = match (key_set, kind.requires_api_key()) {
                (true, _) => "set",
                (false, true) => "not set",
                (false, false) => "not set (optional)",
            };
            Output::kv("api key", &format!("{} ({})", provider.api_key_env, status));
        }
    }
}

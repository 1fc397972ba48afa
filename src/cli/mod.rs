//! CLI module for ytsum.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::provider::ProviderOverrides;
use clap::Parser;

/// ytsum - YouTube transcript summarizer
///
/// Fetches a video's subtitles, summarizes them chunk by chunk with an AI
/// provider and writes a markdown study document.
#[derive(Parser, Debug)]
#[command(name = "ytsum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YouTube video or playlist URL, or a bare video ID
    #[arg(required_unless_present_any = ["list_providers", "create_config"])]
    pub url: Option<String>,

    /// AI provider to use (as named in the config file)
    #[arg(short, long, env = "AI_PROVIDER")]
    pub provider: Option<String>,

    /// Model to use instead of the provider's default
    #[arg(short, long, env = "AI_MODEL")]
    pub model: Option<String>,

    /// API key (overrides the provider's key environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// List configured providers and exit
    #[arg(long)]
    pub list_providers: bool,

    /// Write a default configuration file to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub create_config: Option<String>,

    /// Directory for summary files (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Maximum number of playlist videos to process
    #[arg(long)]
    pub limit: Option<usize>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Provider choices given on the command line or through the environment.
    pub fn provider_overrides(&self) -> ProviderOverrides {
        ProviderOverrides {
            provider: self.provider.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summarize_args() {
        let cli = Cli::try_parse_from([
            "ytsum",
            "--provider",
            "ollama",
            "-m",
            "llama3.2:3b",
            "-o",
            "/tmp/out",
            "--limit",
            "5",
            "-vv",
            "https://youtu.be/dQw4w9WgXcQ",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
        assert_eq!(cli.limit, Some(5));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output_dir.as_deref(), Some("/tmp/out"));

        let overrides = cli.provider_overrides();
        assert_eq!(overrides.provider.as_deref(), Some("ollama"));
        assert_eq!(overrides.model.as_deref(), Some("llama3.2:3b"));
        assert!(overrides.api_key.is_none());
    }

    #[test]
    fn test_url_required_unless_listing() {
        assert!(Cli::try_parse_from(["ytsum"]).is_err());
        assert!(Cli::try_parse_from(["ytsum", "--list-providers"]).is_ok());
        assert!(Cli::try_parse_from(["ytsum", "--create-config", "cfg.json"]).is_ok());
    }
}

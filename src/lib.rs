//! ytsum - YouTube transcript summarizer
//!
//! Turns the subtitles of a YouTube video (or every video of a playlist)
//! into a structured markdown study document.
//!
//! # Overview
//!
//! A run goes through these steps:
//! - Resolve the URL to a video ID or a playlist
//! - Fetch a subtitle track chosen by language priority (via yt-dlp)
//! - Split the transcript into token-bounded chunks
//! - Summarize each chunk with an OpenAI-compatible provider
//! - Assemble the sections into one markdown file
//!
//! # Architecture
//!
//! - `config` - Settings file and prompt templates
//! - `source` - URL parsing and yt-dlp invocation
//! - `transcript` - Subtitle track selection and caption parsing
//! - `chunking` - Token-bounded chunking
//! - `provider` - Provider resolution and the chat-completions client
//! - `summary` - Markdown assembly and file output
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use ytsum::config::Settings;
//! use ytsum::orchestrator::Orchestrator;
//! use ytsum::provider::{ProviderConfig, ProviderOverrides};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let provider = ProviderConfig::resolve(&settings, &ProviderOverrides::default(), |name| {
//!         std::env::var(name).ok()
//!     })?;
//!     let orchestrator = Orchestrator::new(settings, provider)?;
//!
//!     let summary = orchestrator.summarize_video("dQw4w9WgXcQ").await?;
//!     println!("Wrote {}", summary.path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod provider;
pub mod source;
pub mod summary;
pub mod transcript;

pub use error::{Result, SummarizerError};

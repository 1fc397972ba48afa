//! ytsum CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytsum::cli::{commands, Cli};
use ytsum::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytsum={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Some(path) = &cli.create_config {
        return commands::run_create_config(path);
    }

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(Settings::expand_path(path).as_path()))?,
        None => Settings::load()?,
    };

    if cli.list_providers {
        commands::run_list_providers(&settings);
        return Ok(());
    }

    let Some(url) = cli.url.as_deref() else {
        anyhow::bail!("A YouTube video or playlist URL is required");
    };

    let options = commands::SummarizeOptions {
        overrides: cli.provider_overrides(),
        output_dir: cli.output_dir.clone(),
        limit: cli.limit,
        verbose: cli.verbose > 0,
    };
    commands::run_summarize(url, options, settings).await
}

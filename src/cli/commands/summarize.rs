//! Summarize command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{Orchestrator, VideoOutcome};
use crate::provider::{ProviderConfig, ProviderOverrides};
use crate::source::{parse_input, VideoRef};
use anyhow::Result;

/// Lines of the summary shown after a single-video run.
const PREVIEW_LINES: usize = 20;

/// Options for a summarize run.
#[derive(Debug, Clone, Default)]
pub struct SummarizeOptions {
    pub overrides: ProviderOverrides,
    pub output_dir: Option<String>,
    pub limit: Option<usize>,
    pub verbose: bool,
}

/// Run the summarize command.
pub async fn run_summarize(input: &str, options: SummarizeOptions, settings: Settings) -> Result<()> {
    let target = parse_input(input).inspect_err(|e| Output::error(&e.to_string()))?;

    if let Err(e) = preflight::check() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let provider = ProviderConfig::resolve(&settings, &options.overrides, |name| {
        std::env::var(name).ok()
    })
    .inspect_err(|e| Output::error(&e.to_string()))?;

    Output::info(&format!(
        "Using provider {} (model: {})",
        provider.name, provider.model
    ));

    let mut orchestrator = Orchestrator::new(settings, provider)?;
    if let Some(dir) = &options.output_dir {
        orchestrator = orchestrator.with_output_dir(Settings::expand_path(dir));
    }

    match target {
        VideoRef::Video(video_id) => run_single(&orchestrator, &video_id, options.verbose).await,
        VideoRef::Playlist(url) => run_playlist(&orchestrator, &url, options.limit).await,
    }
}

/// Summarize a single video.
async fn run_single(orchestrator: &Orchestrator, video_id: &str, verbose: bool) -> Result<()> {
    Output::info(&format!("Processing: {}", video_id));

    let spinner = Output::spinner("Fetching subtitles and summarizing...");
    let result = orchestrator.summarize_video(video_id).await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            Output::success(&format!(
                "Summarized '{}' ({} sections)",
                summary.title, summary.sections
            ));
            Output::kv("Saved to", &summary.path.display().to_string());

            if !verbose {
                let content = std::fs::read_to_string(&summary.path)?;
                Output::preview(&content, PREVIEW_LINES);
            }
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to summarize: {}", e));
            Err(e.into())
        }
    }
}

/// Summarize every video of a playlist, continuing past failures.
async fn run_playlist(orchestrator: &Orchestrator, url: &str, limit: Option<usize>) -> Result<()> {
    Output::info(&format!("Fetching playlist: {}", url));

    let spinner = Output::spinner("Fetching video list...");
    let ids = orchestrator.list_playlist(url, limit).await;
    spinner.finish_and_clear();
    let ids = ids.inspect_err(|e| Output::error(&e.to_string()))?;

    let total = ids.len();
    Output::info(&format!("Found {} videos to summarize", total));

    let spinner = Output::spinner(&format!("Summarizing {} videos...", total));
    let outcomes = orchestrator.summarize_playlist(&ids).await;
    spinner.finish_and_clear();

    report_outcomes(&outcomes);

    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    println!();
    Output::info(&format!(
        "Playlist complete: {} succeeded, {} failed",
        succeeded,
        total - succeeded
    ));

    if succeeded == 0 {
        anyhow::bail!("No video in the playlist could be summarized");
    }
    Ok(())
}

fn report_outcomes(outcomes: &[VideoOutcome]) {
    for (i, outcome) in outcomes.iter().enumerate() {
        let progress = format!("[{}/{}]", i + 1, outcomes.len());
        match &outcome.result {
            Ok(summary) => Output::success(&format!(
                "{} {} -> {}",
                progress,
                summary.title,
                summary.path.display()
            )),
            Err(e) => Output::warning(&format!("{} {} failed: {}", progress, outcome.video_id, e)),
        }
    }
}

//! Pipeline orchestrator for ytsum.
//!
//! Coordinates the process from subtitle retrieval to the saved markdown file.

use crate::chunking::{Chunk, TokenChunker};
use crate::config::{Prompts, Settings};
use crate::error::{Result, SummarizerError};
use crate::provider::{ChatBackend, ProviderClient, ProviderConfig};
use crate::source::YtDlp;
use crate::summary::{SummaryDocument, SummaryMetadata, SummarySection, SummaryWriter};
use crate::transcript::{format_timestamp, TranscriptFetcher, YtDlpFetcher};
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// The main orchestrator for the ytsum pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    fetcher: Arc<dyn TranscriptFetcher>,
    backend: Arc<dyn ChatBackend>,
    ytdlp: YtDlp,
    writer: SummaryWriter,
}

impl Orchestrator {
    /// Create an orchestrator using yt-dlp and the resolved provider.
    pub fn new(settings: Settings, provider: ProviderConfig) -> Result<Self> {
        let timeout = Duration::from_secs(settings.processing.request_timeout_secs);
        let backend: Arc<dyn ChatBackend> = Arc::new(ProviderClient::new(provider, timeout)?);
        let fetcher: Arc<dyn TranscriptFetcher> =
            Arc::new(YtDlpFetcher::new(&settings.processing)?);

        Ok(Self::with_components(settings, fetcher, backend))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        fetcher: Arc<dyn TranscriptFetcher>,
        backend: Arc<dyn ChatBackend>,
    ) -> Self {
        let prompts = Prompts::from_settings(&settings);
        let writer = SummaryWriter::new(
            settings.output_dir(),
            settings.output.create_dir_if_missing,
            &settings.output.date_format,
        );

        Self {
            settings,
            prompts,
            fetcher,
            backend,
            ytdlp: YtDlp::new(),
            writer,
        }
    }

    /// Write summaries somewhere other than the configured output directory.
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.writer = SummaryWriter::new(
            dir,
            self.settings.output.create_dir_if_missing,
            &self.settings.output.date_format,
        );
        self
    }

    /// Fetch, chunk, summarize and save one video.
    #[instrument(skip(self))]
    pub async fn summarize_video(&self, video_id: &str) -> Result<VideoSummary> {
        info!("Fetching transcript for {}", video_id);
        let video = self.fetcher.fetch(video_id).await?;
        debug!(
            "Transcript: {} lines covering {}, language {}{}",
            video.transcript.lines().len(),
            format_timestamp(video.transcript.duration_seconds()),
            video.language,
            if video.is_generated { " (auto)" } else { "" }
        );

        let chunker = TokenChunker::new(self.settings.processing.max_tokens_per_chunk);
        let chunks = chunker.chunk_transcript(&video.transcript);
        if chunks.is_empty() {
            return Err(SummarizerError::EmptyTranscript(video_id.to_string()));
        }
        info!("Split transcript into {} chunks", chunks.len());

        let sections = self.summarize_chunks(&video.title, &chunks).await?;

        let document = SummaryDocument::new(
            video.title,
            SummaryMetadata {
                video_id: video_id.to_string(),
                provider: self.backend.provider_name().to_string(),
                model: self.backend.model().to_string(),
                generated_at: Local::now(),
            },
            sections,
        );
        let path = self.writer.save(&document)?;

        Ok(VideoSummary {
            video_id: video_id.to_string(),
            title: document.title().to_string(),
            sections: document.sections().len(),
            path,
        })
    }

    /// Summarize chunks one at a time, in order. The first failure aborts.
    pub async fn summarize_chunks(&self, title: &str, chunks: &[Chunk]) -> Result<Vec<SummarySection>> {
        let total = chunks.len();
        let mut sections = Vec::with_capacity(total);

        for chunk in chunks {
            let number = chunk.index + 1;
            info!(
                "Summarizing chunk {}/{} (~{} tokens)",
                number, total, chunk.token_estimate
            );
            let user_prompt = self.prompts.render_chunk(title, number, total, &chunk.text);
            let body = self
                .backend
                .complete(&self.prompts.system, &user_prompt)
                .await?;

            sections.push(SummarySection {
                index: chunk.index,
                body,
                start_seconds: chunk.start_seconds,
            });
        }

        Ok(sections)
    }

    /// List the video ids of a playlist.
    pub async fn list_playlist(&self, playlist_url: &str, limit: Option<usize>) -> Result<Vec<String>> {
        let ids = self.ytdlp.playlist_video_ids(playlist_url, limit).await?;
        if ids.is_empty() {
            return Err(SummarizerError::Playlist(format!(
                "No videos found in playlist {}",
                playlist_url
            )));
        }
        info!("Playlist has {} videos", ids.len());
        Ok(ids)
    }

    /// Summarize every video in order. A failing video is recorded and the
    /// next one proceeds.
    pub async fn summarize_playlist(&self, video_ids: &[String]) -> Vec<VideoOutcome> {
        let mut outcomes = Vec::with_capacity(video_ids.len());

        for (i, video_id) in video_ids.iter().enumerate() {
            info!("Processing video {}/{}: {}", i + 1, video_ids.len(), video_id);
            let result = self.summarize_video(video_id).await;
            if let Err(e) = &result {
                warn!("Failed to summarize {}: {}", video_id, e);
            }
            outcomes.push(VideoOutcome {
                video_id: video_id.clone(),
                result,
            });
        }

        outcomes
    }
}

/// Result of summarizing one video.
#[derive(Debug, Clone)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    /// Number of summarized sections.
    pub sections: usize,
    /// Where the markdown file was written.
    pub path: PathBuf,
}

/// Per-video result of a playlist run.
#[derive(Debug)]
pub struct VideoOutcome {
    pub video_id: String,
    pub result: Result<VideoSummary>,
}

impl VideoOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{Transcript, TranscriptLine, VideoTranscript};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeFetcher;

    #[async_trait]
    impl TranscriptFetcher for FakeFetcher {
        async fn fetch(&self, video_id: &str) -> Result<VideoTranscript> {
            let lines = match video_id {
                "nosubs00002" => {
                    return Err(SummarizerError::NoSubtitlesFound(video_id.to_string()))
                }
                "blank000000" => Vec::new(),
                _ => (0..40)
                    .map(|i| {
                        TranscriptLine::new(
                            i as f64 * 5.0,
                            5.0,
                            &format!("Sentence number {} of the talk.", i),
                        )
                    })
                    .collect(),
            };
            Ok(VideoTranscript {
                video_id: video_id.to_string(),
                title: format!("Video {}", video_id),
                language: "en".to_string(),
                is_generated: false,
                transcript: Transcript::new(lines),
            })
        }
    }

    #[derive(Default)]
    struct RecordingBackend {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatBackend for RecordingBackend {
        fn provider_name(&self) -> &str {
            "fake"
        }

        fn model(&self) -> &str {
            "fake-model"
        }

        async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(user_prompt.to_string());
            Ok(format!("summary {}", prompts.len()))
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        fn provider_name(&self) -> &str {
            "fake"
        }

        fn model(&self) -> &str {
            "fake-model"
        }

        async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
            Err(SummarizerError::Provider {
                status: Some(503),
                message: "overloaded".to_string(),
            })
        }
    }

    fn settings(dir: &std::path::Path, max_tokens: usize) -> Settings {
        let mut settings = Settings::default();
        settings.output.output_dir = dir.to_string_lossy().to_string();
        settings.processing.max_tokens_per_chunk = max_tokens;
        settings
    }

    #[tokio::test]
    async fn test_summarize_video_writes_ordered_sections() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(RecordingBackend::default());
        let orchestrator = Orchestrator::with_components(
            settings(dir.path(), 100),
            Arc::new(FakeFetcher),
            backend.clone(),
        );

        let summary = orchestrator.summarize_video("aaaaaaaaaaa").await.unwrap();

        assert!(summary.sections > 1);
        assert_eq!(summary.path, dir.path().join("Video_aaaaaaaaaaa.md"));

        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), summary.sections);
        assert!(prompts[0].contains(&format!("Part 1 of {}", summary.sections)));

        let content = std::fs::read_to_string(&summary.path).unwrap();
        assert!(content.starts_with("# Video aaaaaaaaaaa\n"));
        assert!(content.contains("*Provider: fake (model: fake-model)*"));
        let first = content.find("summary 1\n").unwrap();
        let second = content.find("summary 2\n").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_empty_transcript_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::with_components(
            settings(dir.path(), 3000),
            Arc::new(FakeFetcher),
            Arc::new(RecordingBackend::default()),
        );

        let err = orchestrator.summarize_video("blank000000").await.unwrap_err();
        assert!(matches!(err, SummarizerError::EmptyTranscript(ref id) if id == "blank000000"));
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_video() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::with_components(
            settings(dir.path(), 3000),
            Arc::new(FakeFetcher),
            Arc::new(FailingBackend),
        );

        let err = orchestrator.summarize_video("aaaaaaaaaaa").await.unwrap_err();
        assert!(matches!(err, SummarizerError::Provider { status: Some(503), .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_playlist_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::with_components(
            settings(dir.path(), 3000),
            Arc::new(FakeFetcher),
            Arc::new(RecordingBackend::default()),
        );
        let ids = vec![
            "first000001".to_string(),
            "nosubs00002".to_string(),
            "third000003".to_string(),
        ];

        let outcomes = orchestrator.summarize_playlist(&ids).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].video_id, "first000001");
        assert_eq!(outcomes[1].video_id, "nosubs00002");
        assert_eq!(outcomes[2].video_id, "third000003");

        assert!(outcomes[0].result.as_ref().unwrap().path.exists());
        assert!(matches!(
            outcomes[1].result,
            Err(SummarizerError::NoSubtitlesFound(_))
        ));
        assert!(outcomes[2].result.as_ref().unwrap().path.exists());
    }

    #[tokio::test]
    async fn test_output_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let other = dir.path().join("elsewhere");
        let orchestrator = Orchestrator::with_components(
            settings(dir.path(), 3000),
            Arc::new(FakeFetcher),
            Arc::new(RecordingBackend::default()),
        )
        .with_output_dir(other.clone());

        let summary = orchestrator.summarize_video("aaaaaaaaaaa").await.unwrap();
        assert_eq!(summary.sections, 1);
        assert!(summary.path.starts_with(&other));
    }
}

//! Subtitle retrieval through yt-dlp.

use super::captions::{parse_json3, parse_vtt};
use super::models::{format_timestamp, Transcript, VideoTranscript};
use super::tracks::{CaptionFormat, TrackListing};
use super::TranscriptFetcher;
use crate::config::ProcessingSettings;
use crate::error::{Result, SummarizerError};
use crate::source::YtDlp;
use crate::summary::DEFAULT_TITLE;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};

const CAPTION_TIMEOUT_SECS: u64 = 30;

/// Fetches subtitles by listing tracks with yt-dlp and downloading the
/// selected track directly.
pub struct YtDlpFetcher {
    ytdlp: YtDlp,
    http: reqwest::Client,
    language_priority: Vec<String>,
    prefer_manual: bool,
}

impl YtDlpFetcher {
    /// Create a fetcher using the processing settings' language preferences.
    pub fn new(processing: &ProcessingSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(CAPTION_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            ytdlp: YtDlp::new(),
            http,
            language_priority: processing.language_priority.clone(),
            prefer_manual: processing.prefer_manual_transcripts,
        })
    }

    /// Use a specific yt-dlp runner.
    pub fn with_ytdlp(mut self, ytdlp: YtDlp) -> Self {
        self.ytdlp = ytdlp;
        self
    }

    async fn download(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SummarizerError::VideoUnavailable(format!(
                "subtitle download failed with HTTP {}",
                status.as_u16()
            )));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl TranscriptFetcher for YtDlpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<VideoTranscript> {
        let info = self.ytdlp.video_info(video_id).await?;
        debug!(
            "Video {} by {} ({})",
            video_id,
            info.channel.as_deref().unwrap_or("unknown channel"),
            info.duration
                .map(format_timestamp)
                .unwrap_or_else(|| "unknown length".to_string())
        );

        let listing = TrackListing::new(
            info.subtitles.unwrap_or_default(),
            info.automatic_captions.unwrap_or_default(),
        );
        debug!("{} subtitle tracks available", listing.tracks().len());

        let track = listing.select(video_id, &self.language_priority, self.prefer_manual)?;
        let (url, format) = track.preferred_format().ok_or_else(|| {
            SummarizerError::NoSubtitlesFound(format!(
                "track {} of video {} has no readable format",
                track.language, video_id
            ))
        })?;

        info!(
            "Found {} {} subtitles",
            if track.is_generated { "auto-generated" } else { "official" },
            track.language
        );

        let body = self.download(url).await?;
        let lines = match format {
            CaptionFormat::Json3 => parse_json3(&body)?,
            CaptionFormat::Vtt => parse_vtt(&body),
        };

        let title = info
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(VideoTranscript {
            video_id: info.id,
            title,
            language: track.language.clone(),
            is_generated: track.is_generated,
            transcript: Transcript::new(lines),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Write an executable stand-in for yt-dlp that prints `stdout` and exits with `code`.
    fn fake_ytdlp(dir: &Path, stdout: &str, code: i32) -> YtDlp {
        let path = dir.join("yt-dlp");
        let script = format!("#!/bin/sh\ncat <<'JSON'\n{}\nJSON\nexit {}\n", stdout, code);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        YtDlp::with_program(path.to_string_lossy().to_string())
    }

    fn fetcher(ytdlp: YtDlp) -> YtDlpFetcher {
        YtDlpFetcher::new(&ProcessingSettings::default())
            .unwrap()
            .with_ytdlp(ytdlp)
    }

    #[tokio::test]
    async fn test_no_track_in_priority_languages() {
        let dir = tempfile::tempdir().unwrap();
        let info = r#"{"id": "dQw4w9WgXcQ", "title": "t",
            "subtitles": {"fr": [{"ext": "json3", "url": "http://127.0.0.1:9/fr"}]},
            "automatic_captions": {"de": [{"ext": "vtt", "url": "http://127.0.0.1:9/de"}]}}"#;
        let fetcher = fetcher(fake_ytdlp(dir.path(), info, 0));

        let err = fetcher.fetch("dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(err, SummarizerError::NoSubtitlesFound(_)), "{err}");
    }

    #[tokio::test]
    async fn test_unresolvable_video() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher(fake_ytdlp(dir.path(), "ERROR: Video unavailable", 1));

        let err = fetcher.fetch("aaaaaaaaaaa").await.unwrap_err();
        assert!(matches!(err, SummarizerError::VideoUnavailable(_)), "{err}");
    }
}

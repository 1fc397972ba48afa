//! Thin wrapper around the `yt-dlp` executable.
//!
//! yt-dlp already tracks YouTube's moving target, so metadata, subtitle track
//! listings and playlist contents all come from its JSON output.

use super::youtube::watch_url;
use crate::error::{Result, SummarizerError};
use crate::transcript::TrackFormat;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Video metadata as reported by `yt-dlp --dump-json`.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    /// Manually-created subtitle tracks keyed by language code.
    #[serde(default)]
    pub subtitles: Option<BTreeMap<String, Vec<TrackFormat>>>,
    /// Auto-generated caption tracks keyed by language code.
    #[serde(default)]
    pub automatic_captions: Option<BTreeMap<String, Vec<TrackFormat>>>,
}

/// Runs yt-dlp subcommands.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
}

impl YtDlp {
    pub fn new() -> Self {
        Self {
            program: "yt-dlp".to_string(),
        }
    }

    /// Use a different executable (e.g. a pinned path).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<std::process::Output> {
        debug!("Running {} {}", self.program, args.join(" "));
        Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SummarizerError::ToolNotFound(self.program.clone())
                } else {
                    SummarizerError::ToolFailed(format!("Failed to run {}: {}", self.program, e))
                }
            })
    }

    /// Fetch metadata and subtitle listings for a single video.
    #[instrument(skip(self))]
    pub async fn video_info(&self, video_id: &str) -> Result<VideoInfo> {
        let url = watch_url(video_id);
        let output = self
            .run(&[
                "--dump-json",
                "--skip-download",
                "--no-playlist",
                "--no-warnings",
                &url,
            ])
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SummarizerError::VideoUnavailable(format!(
                "{}: {}",
                video_id,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(stdout.trim()).map_err(|e| {
            SummarizerError::ToolFailed(format!("Failed to parse yt-dlp output: {}", e))
        })
    }

    /// List the video IDs of a playlist in playlist order.
    #[instrument(skip(self))]
    pub async fn playlist_video_ids(&self, playlist_url: &str, limit: Option<usize>) -> Result<Vec<String>> {
        let limit_str = limit.map(|l| l.to_string());
        let mut args = vec!["--flat-playlist", "--dump-json", "--no-warnings"];
        if let Some(l) = limit_str.as_deref() {
            args.extend(["--playlist-end", l]);
        }
        args.push(playlist_url);

        let output = self.run(&args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SummarizerError::Playlist(format!(
                "Failed to list playlist videos: {}",
                stderr.trim()
            )));
        }

        let ids = parse_flat_playlist(&String::from_utf8_lossy(&output.stdout));
        if ids.is_empty() {
            warn!("No videos found in playlist {}", playlist_url);
        }
        Ok(ids)
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `--flat-playlist --dump-json` output (one JSON object per line).
///
/// Duplicate IDs are dropped while preserving first-seen order.
pub fn parse_flat_playlist(stdout: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Ok(json) = serde_json::from_str::<serde_json::Value>(line) else {
            debug!("Skipping unparseable playlist entry");
            continue;
        };

        let id = json["id"]
            .as_str()
            .map(str::to_string)
            .or_else(|| json["url"].as_str().and_then(|u| super::extract_video_id(u).ok()));

        if let Some(id) = id {
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_playlist() {
        let stdout = r#"
{"id": "aaaaaaaaaaa", "title": "First"}
{"id": "bbbbbbbbbbb", "title": "Second"}
not json
{"url": "https://www.youtube.com/watch?v=ccccccccccc"}
{"id": "aaaaaaaaaaa", "title": "First again"}
"#;
        assert_eq!(
            parse_flat_playlist(stdout),
            vec!["aaaaaaaaaaa", "bbbbbbbbbbb", "ccccccccccc"]
        );
    }

    #[test]
    fn test_video_info_deserialize() {
        let json = r#"{
            "id": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "subtitles": {
                "en": [{"ext": "json3", "url": "https://example.com/en.json3"}]
            },
            "automatic_captions": null
        }"#;
        let info: VideoInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.title.as_deref(), Some("Never Gonna Give You Up"));
        assert_eq!(info.subtitles.unwrap()["en"][0].ext, "json3");
        assert!(info.automatic_captions.is_none());
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let ytdlp = YtDlp::with_program("ytsum-definitely-not-installed");
        let err = ytdlp.video_info("dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(err, SummarizerError::ToolNotFound(_)));
    }
}

//! Transcript retrieval for YouTube videos.
//!
//! Subtitle tracks are listed with yt-dlp, one track is chosen by language
//! priority (manual tracks before auto-generated ones by default) and its
//! captions are parsed into timed lines.

mod captions;
mod fetcher;
mod models;
mod tracks;

pub use captions::{parse_json3, parse_vtt};
pub use fetcher::YtDlpFetcher;
pub use models::{format_timestamp, normalize_whitespace, Transcript, TranscriptLine, VideoTranscript};
pub use tracks::{CaptionFormat, SubtitleTrack, TrackFormat, TrackListing};

use crate::error::Result;
use async_trait::async_trait;

/// Trait for subtitle sources.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the transcript of a video.
    ///
    /// Fails with `VideoUnavailable` when the video cannot be resolved and
    /// with `NoSubtitlesFound` when no track matches the language priority.
    async fn fetch(&self, video_id: &str) -> Result<VideoTranscript>;
}

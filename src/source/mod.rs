//! Video sources: URL parsing and yt-dlp access.

mod youtube;
mod ytdlp;

pub use youtube::{extract_video_id, is_playlist_url, is_youtube_host, url_with_timestamp, watch_url};
pub use ytdlp::{parse_flat_playlist, VideoInfo, YtDlp};

use crate::error::{Result, SummarizerError};

/// What a user-supplied URL refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoRef {
    /// A single video, by ID.
    Video(String),
    /// A playlist, by URL.
    Playlist(String),
}

/// Classify user input as a single video or a playlist.
pub fn parse_input(input: &str) -> Result<VideoRef> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SummarizerError::InvalidInput("URL is required".to_string()));
    }
    if is_playlist_url(input) {
        return Ok(VideoRef::Playlist(input.to_string()));
    }
    extract_video_id(input).map(VideoRef::Video)
}

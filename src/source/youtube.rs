//! YouTube URL parsing.

use crate::error::{Result, SummarizerError};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn bare_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("valid video id regex"))
}

/// Check whether a host belongs to YouTube.
pub fn is_youtube_host(host: &str) -> bool {
    let h = host.to_ascii_lowercase();
    h == "youtube.com" || h == "youtu.be" || h.ends_with(".youtube.com")
}

fn parse_url(input: &str) -> Option<Url> {
    let input = input.trim();
    let url = Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{}", input)))
        .ok()?;
    let host = url.host_str()?;
    is_youtube_host(host).then_some(url)
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Detect whether the URL points at a playlist.
///
/// Both `/playlist?list=…` pages and watch URLs carrying a `list` parameter
/// count as playlists.
pub fn is_playlist_url(input: &str) -> bool {
    let Some(url) = parse_url(input) else {
        return false;
    };
    if url.host_str().is_some_and(|h| h.eq_ignore_ascii_case("youtu.be")) {
        return false;
    }
    match url.path() {
        "/playlist" => true,
        "/watch" => query_param(&url, "list").is_some(),
        _ => false,
    }
}

/// Extract the video ID from a YouTube URL or a bare 11-character ID.
///
/// Playlist URLs are rejected so callers route them to the playlist driver.
pub fn extract_video_id(input: &str) -> Result<String> {
    let trimmed = input.trim();

    if bare_id_regex().is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    if is_playlist_url(trimmed) {
        return Err(SummarizerError::InvalidInput(format!(
            "{} is a playlist URL, not a single video",
            trimmed
        )));
    }

    let url = parse_url(trimmed).ok_or_else(|| {
        SummarizerError::InvalidInput(format!("Invalid YouTube URL: {}", trimmed))
    })?;

    let id = if url.host_str().is_some_and(|h| h.eq_ignore_ascii_case("youtu.be")) {
        url.path_segments().and_then(|mut s| s.next()).map(str::to_string)
    } else if url.path() == "/watch" {
        query_param(&url, "v")
    } else {
        url.path_segments().and_then(|mut segs| {
            let prefix = segs.next()?;
            let id = segs.next()?;
            matches!(prefix, "embed" | "v" | "shorts" | "live").then(|| id.to_string())
        })
    };

    id.filter(|id| !id.is_empty())
        .ok_or_else(|| SummarizerError::InvalidInput(format!("Invalid YouTube URL: {}", trimmed)))
}

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Watch URL that starts playback at the given offset.
pub fn url_with_timestamp(video_id: &str, seconds: f64) -> String {
    format!("https://youtube.com/watch?v={}&t={}s", video_id, seconds as u32)
}

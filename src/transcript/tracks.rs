//! Subtitle track listings and language-priority selection.

use crate::error::{Result, SummarizerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One downloadable rendition of a subtitle track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackFormat {
    /// File extension (json3, vtt, srv1, ...).
    pub ext: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Caption payload formats ytsum can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    Json3,
    Vtt,
}

impl CaptionFormat {
    fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "json3" => Some(CaptionFormat::Json3),
            "vtt" => Some(CaptionFormat::Vtt),
            _ => None,
        }
    }
}

/// A subtitle track in one language.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleTrack {
    pub language: String,
    pub is_generated: bool,
    pub formats: Vec<TrackFormat>,
}

impl SubtitleTrack {
    /// Pick the format to download: json3 when offered, otherwise vtt.
    pub fn preferred_format(&self) -> Option<(&str, CaptionFormat)> {
        [CaptionFormat::Json3, CaptionFormat::Vtt]
            .into_iter()
            .find_map(|wanted| {
                self.formats.iter().find_map(|f| {
                    let url = f.url.as_deref()?;
                    (CaptionFormat::from_ext(&f.ext) == Some(wanted)).then_some((url, wanted))
                })
            })
    }
}

/// All subtitle tracks available for a video.
#[derive(Debug, Clone, Default)]
pub struct TrackListing {
    tracks: Vec<SubtitleTrack>,
}

impl TrackListing {
    /// Build a listing from yt-dlp's `subtitles` / `automatic_captions` maps.
    pub fn new(
        manual: BTreeMap<String, Vec<TrackFormat>>,
        automatic: BTreeMap<String, Vec<TrackFormat>>,
    ) -> Self {
        let manual = manual.into_iter().map(|(language, formats)| SubtitleTrack {
            language,
            is_generated: false,
            formats,
        });
        let automatic = automatic.into_iter().map(|(language, formats)| SubtitleTrack {
            language,
            is_generated: true,
            formats,
        });

        Self {
            tracks: manual
                .chain(automatic)
                // live_chat and similar pseudo-tracks carry no caption text
                .filter(|t| t.preferred_format().is_some())
                .collect(),
        }
    }

    pub fn tracks(&self) -> &[SubtitleTrack] {
        &self.tracks
    }

    /// Select a track by language priority.
    ///
    /// With `prefer_manual`, every priority language is tried for a manual
    /// track before any auto-generated track is considered; otherwise the
    /// passes are swapped. Language codes match exactly, ignoring case.
    pub fn select(
        &self,
        video_id: &str,
        language_priority: &[String],
        prefer_manual: bool,
    ) -> Result<&SubtitleTrack> {
        let passes = if prefer_manual {
            [false, true]
        } else {
            [true, false]
        };

        for generated in passes {
            for lang in language_priority {
                if let Some(track) = self
                    .tracks
                    .iter()
                    .find(|t| t.is_generated == generated && t.language.eq_ignore_ascii_case(lang))
                {
                    return Ok(track);
                }
            }
        }

        Err(no_subtitles(video_id, language_priority, &self.tracks))
    }
}

fn no_subtitles(video_id: &str, wanted: &[String], available: &[SubtitleTrack]) -> SummarizerError {
    let available = if available.is_empty() {
        "none".to_string()
    } else {
        available
            .iter()
            .map(|t| {
                if t.is_generated {
                    format!("{} (auto)", t.language)
                } else {
                    t.language.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    SummarizerError::NoSubtitlesFound(format!(
        "video {} has no subtitles in [{}] (available: {})",
        video_id,
        wanted.join(", "),
        available
    ))
}

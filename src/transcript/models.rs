//! Data models for transcripts.

use serde::{Deserialize, Serialize};

/// A single timed subtitle line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// How long the line is displayed, in seconds.
    pub duration_seconds: f64,
    /// Line text with whitespace normalized.
    pub text: String,
}

impl TranscriptLine {
    /// Create a new line, normalizing whitespace in the text.
    pub fn new(start_seconds: f64, duration_seconds: f64, text: &str) -> Self {
        Self {
            start_seconds,
            duration_seconds,
            text: normalize_whitespace(text),
        }
    }

    /// End time in seconds.
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }
}

/// An ordered, immutable sequence of subtitle lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    /// Create a transcript, dropping lines that are empty after normalization.
    pub fn new(lines: Vec<TranscriptLine>) -> Self {
        Self {
            lines: lines.into_iter().filter(|l| !l.text.is_empty()).collect(),
        }
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total duration in seconds (end of the last line).
    pub fn duration_seconds(&self) -> f64 {
        self.lines.last().map(|l| l.end_seconds()).unwrap_or(0.0)
    }

    /// The transcript as text, one subtitle line per text line.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Start time of the line containing the byte offset `offset` of [`Transcript::text`].
    pub fn start_time_at(&self, offset: usize) -> Option<f64> {
        let mut line_start = 0;
        for line in &self.lines {
            let line_end = line_start + line.text.len();
            if offset <= line_end {
                return Some(line.start_seconds);
            }
            // +1 for the joining newline
            line_start = line_end + 1;
        }
        None
    }
}

/// A fetched transcript together with the video it belongs to.
#[derive(Debug, Clone)]
pub struct VideoTranscript {
    pub video_id: String,
    pub title: String,
    /// Language code of the selected subtitle track.
    pub language: String,
    /// Whether the track was auto-generated.
    pub is_generated: bool,
    pub transcript: Transcript,
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

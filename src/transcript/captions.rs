//! Caption payload parsing (YouTube json3 and WebVTT).

use super::models::TranscriptLine;
use crate::error::{Result, SummarizerError};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Deserialize)]
struct Json3Document {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Segment>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Parse YouTube's json3 caption format.
///
/// Events without text (window definitions, bare newlines) are skipped.
pub fn parse_json3(body: &str) -> Result<Vec<TranscriptLine>> {
    let doc: Json3Document = serde_json::from_str(body).map_err(|e| {
        SummarizerError::NoSubtitlesFound(format!("unreadable json3 captions: {}", e))
    })?;

    Ok(doc
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let line = TranscriptLine::new(
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
                &text,
            );
            (!line.text.is_empty()).then_some(line)
        })
        .collect())
}

fn inline_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

/// Parse `HH:MM:SS.mmm` or `MM:SS.mmm` into seconds.
fn parse_vtt_timestamp(ts: &str) -> Option<f64> {
    let parts: Vec<&str> = ts.trim().split(':').collect();
    let (h, m, s) = match parts.as_slice() {
        [h, m, s] => (h.parse::<f64>().ok()?, m.parse::<f64>().ok()?, s.parse::<f64>().ok()?),
        [m, s] => (0.0, m.parse::<f64>().ok()?, s.parse::<f64>().ok()?),
        _ => return None,
    };
    Some(h * 3600.0 + m * 60.0 + s)
}

fn parse_timing_line(line: &str) -> Option<(f64, f64)> {
    let (start, rest) = line.split_once("-->")?;
    let end = rest.split_whitespace().next()?;
    Some((parse_vtt_timestamp(start)?, parse_vtt_timestamp(end)?))
}

/// Parse a WebVTT caption file.
///
/// Inline styling and word-timing tags are stripped. Auto-generated VTT
/// repeats the previous caption line in each cue (rolling captions), so a
/// text line identical to the previously emitted one is dropped.
pub fn parse_vtt(body: &str) -> Vec<TranscriptLine> {
    let mut lines = Vec::new();
    let mut last_text = String::new();
    let mut timing: Option<(f64, f64)> = None;

    for raw in body.lines() {
        let raw = raw.trim();

        if raw.is_empty() {
            timing = None;
            continue;
        }
        if let Some(t) = parse_timing_line(raw) {
            timing = Some(t);
            continue;
        }
        // Header, NOTE/STYLE blocks and cue identifiers sit outside any cue timing.
        let Some((start, end)) = timing else {
            continue;
        };

        let stripped = inline_tag_regex().replace_all(raw, "");
        let line = TranscriptLine::new(start, (end - start).max(0.0), &stripped);
        if line.text.is_empty() || line.text == last_text {
            continue;
        }
        last_text = line.text.clone();
        lines.push(line);
    }

    lines
}

//! Token-bounded chunking of transcript text.
//!
//! Text is cut into units at sentence ends and line breaks, then units are
//! packed greedily into chunks whose estimated token count stays within the
//! configured limit. Chunks concatenate back to the input exactly.

use crate::transcript::Transcript;
use serde::{Deserialize, Serialize};

/// A contiguous slice of transcript text sent to the provider as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based position of this chunk in the transcript.
    pub index: usize,
    /// Text content, including trailing separators.
    pub text: String,
    /// Estimated token count of `text`.
    pub token_estimate: usize,
    /// Start time of the subtitle line the chunk begins in, if known.
    pub start_seconds: Option<f64>,
}

/// Rough token estimate (~4 characters per token for English).
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Split text into units ending at a sentence terminator followed by
/// whitespace, or at a newline. Separating whitespace stays with the
/// preceding unit, so the units concatenate to `text`.
pub fn split_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let cut = match c {
            '\n' => Some(i + 1),
            '.' | '!' | '?' => {
                if chars.peek().is_some_and(|(_, next)| next.is_whitespace()) {
                    // Swallow the whitespace run, newlines included.
                    let mut end = i + 1;
                    while let Some(&(j, w)) = chars.peek() {
                        if !w.is_whitespace() {
                            break;
                        }
                        end = j + w.len_utf8();
                        chars.next();
                    }
                    Some(end)
                } else {
                    None
                }
            }
            _ => None,
        };

        if let Some(end) = cut {
            units.push(&text[start..end]);
            start = end;
        }
    }

    if start < text.len() {
        units.push(&text[start..]);
    }

    units
}

/// Greedy packer of sentence/line units into token-bounded chunks.
#[derive(Debug, Clone)]
pub struct TokenChunker {
    max_tokens: usize,
}

impl TokenChunker {
    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens: max_tokens.max(1),
        }
    }

    /// Split text into chunks.
    ///
    /// A unit that alone exceeds the limit becomes its own chunk rather than
    /// being cut mid-sentence. Whitespace-only text yields no chunks.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        self.pack(text)
            .into_iter()
            .enumerate()
            .map(|(index, (_, slice))| Chunk {
                index,
                text: slice.to_string(),
                token_estimate: estimate_tokens(slice),
                start_seconds: None,
            })
            .collect()
    }

    /// Split a transcript's text into chunks tagged with start times.
    pub fn chunk_transcript(&self, transcript: &Transcript) -> Vec<Chunk> {
        let text = transcript.text();
        self.pack(&text)
            .into_iter()
            .enumerate()
            .map(|(index, (offset, slice))| Chunk {
                index,
                text: slice.to_string(),
                token_estimate: estimate_tokens(slice),
                start_seconds: transcript.start_time_at(offset),
            })
            .collect()
    }

    /// Returns (byte offset, slice) pairs covering `text`.
    fn pack<'a>(&self, text: &'a str) -> Vec<(usize, &'a str)> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut chunk_start = 0;
        let mut chunk_end = 0;

        for unit in split_units(text) {
            let unit_end = chunk_end + unit.len();
            let candidate = &text[chunk_start..unit_end];

            if chunk_end > chunk_start && estimate_tokens(candidate) > self.max_tokens {
                chunks.push((chunk_start, &text[chunk_start..chunk_end]));
                chunk_start = chunk_end;
            }
            chunk_end = unit_end;
        }

        if chunk_end > chunk_start {
            chunks.push((chunk_start, &text[chunk_start..chunk_end]));
        }

        chunks
    }
}

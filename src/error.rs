//! Error types for ytsum.

use thiserror::Error;

/// Library-level error type for ytsum operations.
#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("No subtitles found: {0}")]
    NoSubtitlesFound(String),

    #[error("Transcript is empty for video {0}")]
    EmptyTranscript(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Provider error{}: {message}", status_suffix(.status))]
    Provider {
        /// HTTP status code, when the provider answered at all.
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Playlist error: {0}")]
    Playlist(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SummarizerError {
    /// Build a provider error without an HTTP status (transport failure, bad payload).
    pub fn provider(message: impl Into<String>) -> Self {
        SummarizerError::Provider {
            status: None,
            message: message.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

/// Result type alias for ytsum operations.
pub type Result<T> = std::result::Result<T, SummarizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = SummarizerError::Provider {
            status: Some(429),
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "Provider error (HTTP 429): rate limited");

        let err = SummarizerError::provider("connection reset");
        assert_eq!(err.to_string(), "Provider error: connection reset");
    }
}

//! Assembly of per-chunk summaries into a markdown document.

mod writer;

pub use writer::{sanitize_filename, SummaryWriter};

use crate::error::{Result, SummarizerError};
use crate::source::{url_with_timestamp, watch_url};
use crate::transcript::format_timestamp;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Title used when the video has none.
pub const DEFAULT_TITLE: &str = "YouTube Video Summary";

/// Provider's summary of one chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySection {
    /// Index of the chunk this section summarizes.
    pub index: usize,
    pub body: String,
    /// Offset into the video where the chunk begins.
    pub start_seconds: Option<f64>,
}

/// Provenance printed in the document header.
#[derive(Debug, Clone)]
pub struct SummaryMetadata {
    pub video_id: String,
    pub provider: String,
    pub model: String,
    pub generated_at: DateTime<Local>,
}

/// Final markdown artifact for one video.
#[derive(Debug, Clone)]
pub struct SummaryDocument {
    title: String,
    metadata: SummaryMetadata,
    sections: Vec<SummarySection>,
}

impl SummaryDocument {
    /// Build a document. Sections may arrive in any order; they are sorted
    /// by chunk index.
    pub fn new(
        title: impl Into<String>,
        metadata: SummaryMetadata,
        mut sections: Vec<SummarySection>,
    ) -> Self {
        sections.sort_by_key(|s| s.index);
        let title = title.into();
        let title = if title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.trim().to_string()
        };

        Self {
            title,
            metadata,
            sections,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn metadata(&self) -> &SummaryMetadata {
        &self.metadata
    }

    pub fn sections(&self) -> &[SummarySection] {
        &self.sections
    }

    /// Render as markdown, formatting the generation time with `date_format`
    /// (strftime syntax). An unusable format is a `Config` error.
    pub fn render(&self, date_format: &str) -> Result<String> {
        let count = self.sections.len();
        let multi = count > 1;

        let mut generated_on = String::new();
        write!(generated_on, "{}", self.metadata.generated_at.format(date_format)).map_err(|_| {
            SummarizerError::Config(format!("Invalid date_format '{}'", date_format))
        })?;

        let mut doc = String::new();
        let _ = writeln!(doc, "# {}\n", self.title);
        let _ = writeln!(doc, "*Generated on: {}*", generated_on);
        let _ = writeln!(
            doc,
            "*Provider: {} (model: {})*",
            self.metadata.provider, self.metadata.model
        );
        let _ = writeln!(doc, "*Source: {}*", watch_url(&self.metadata.video_id));
        let _ = writeln!(doc, "*Total sections: {}*\n", count);

        if multi {
            doc.push_str("## Table of Contents\n\n");
            for part in 1..=count {
                let _ = writeln!(doc, "- [Part {}](#part-{})", part, part);
            }
            doc.push_str("\n---\n\n");
        }

        for (i, section) in self.sections.iter().enumerate() {
            if multi {
                let _ = writeln!(doc, "## Part {}\n", i + 1);
                if let Some(start) = section.start_seconds {
                    let _ = writeln!(
                        doc,
                        "*Starts at [{}]({})*\n",
                        format_timestamp(start),
                        url_with_timestamp(&self.metadata.video_id, start)
                    );
                }
            }
            let _ = writeln!(doc, "{}\n", section.body.trim());

            if i + 1 < count {
                doc.push_str("---\n\n");
            }
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metadata() -> SummaryMetadata {
        SummaryMetadata {
            video_id: "dQw4w9WgXcQ".to_string(),
            provider: "openrouter".to_string(),
            model: "test-model".to_string(),
            generated_at: Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        }
    }

    fn section(index: usize, body: &str, start: Option<f64>) -> SummarySection {
        SummarySection {
            index,
            body: body.to_string(),
            start_seconds: start,
        }
    }

    #[test]
    fn test_single_section_has_no_toc() {
        let doc = SummaryDocument::new(
            "My Video",
            metadata(),
            vec![section(0, "Only part.", Some(0.0))],
        );
        let md = doc.render("%Y-%m-%d %H:%M:%S").unwrap();

        assert!(md.starts_with("# My Video\n\n"));
        assert!(md.contains("*Generated on: 2024-03-01 12:30:00*"));
        assert!(md.contains("*Provider: openrouter (model: test-model)*"));
        assert!(md.contains("*Source: https://www.youtube.com/watch?v=dQw4w9WgXcQ*"));
        assert!(md.contains("*Total sections: 1*"));
        assert!(!md.contains("Table of Contents"));
        assert!(!md.contains("## Part"));
        assert!(!md.contains("---"));
        assert!(md.contains("Only part.\n"));
    }

    #[test]
    fn test_sections_ordered_by_index() {
        let doc = SummaryDocument::new(
            "Ordered",
            metadata(),
            vec![
                section(2, "third", Some(130.0)),
                section(0, "first", Some(0.0)),
                section(1, "second", None),
            ],
        );
        let md = doc.render("%Y").unwrap();

        let first = md.find("first").unwrap();
        let second = md.find("second").unwrap();
        let third = md.find("third").unwrap();
        assert!(first < second && second < third);

        assert!(md.contains("## Table of Contents\n\n- [Part 1](#part-1)\n- [Part 2](#part-2)\n- [Part 3](#part-3)\n"));
        assert!(md.contains("## Part 3\n\n*Starts at [02:10](https://youtube.com/watch?v=dQw4w9WgXcQ&t=130s)*"));
        assert!(!md.contains("## Part 2\n\n*Starts"));
        assert_eq!(md.matches("\n---\n").count(), 3);
    }

    #[test]
    fn test_invalid_date_format_is_error() {
        let doc = SummaryDocument::new("T", metadata(), vec![section(0, "x", None)]);
        assert!(matches!(
            doc.render("%Y-%m-%d %Q"),
            Err(SummarizerError::Config(_))
        ));
    }

    #[test]
    fn test_blank_title_falls_back() {
        let doc = SummaryDocument::new("  ", metadata(), vec![section(0, "x", None)]);
        assert_eq!(doc.title(), DEFAULT_TITLE);
    }
}

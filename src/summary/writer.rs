//! Writing summary documents to disk.

use super::SummaryDocument;
use crate::error::Result;
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use tracing::{info, warn};

fn underscore_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_+").expect("valid regex"))
}

/// Make a title safe to use as a file name.
///
/// Drops `<>:"/\|?*` and control characters, turns spaces into underscores
/// and collapses underscore runs.
pub fn sanitize_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .filter(|c| !c.is_control())
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    underscore_runs()
        .replace_all(&replaced, "_")
        .trim_matches('_')
        .to_string()
}

/// Saves rendered documents into an output directory.
///
/// Paths written by this writer are remembered, so two videos with the same
/// title in one run do not overwrite each other.
#[derive(Debug)]
pub struct SummaryWriter {
    output_dir: PathBuf,
    create_dir_if_missing: bool,
    date_format: String,
    written: Mutex<HashSet<PathBuf>>,
}

impl SummaryWriter {
    pub fn new(output_dir: impl Into<PathBuf>, create_dir_if_missing: bool, date_format: &str) -> Self {
        Self {
            output_dir: output_dir.into(),
            create_dir_if_missing,
            date_format: date_format.to_string(),
            written: Mutex::new(HashSet::new()),
        }
    }

    /// File path a document would be written to, ignoring earlier saves.
    pub fn path_for(&self, document: &SummaryDocument) -> PathBuf {
        let mut stem = sanitize_filename(document.title());
        if stem.is_empty() {
            stem = sanitize_filename(&document.metadata().video_id);
        }
        self.output_dir.join(format!("{}.md", stem))
    }

    /// Render and write a document, returning the file path.
    ///
    /// When another document already went to the same path in this run, the
    /// video id is appended to the file name.
    pub fn save(&self, document: &SummaryDocument) -> Result<PathBuf> {
        let content = document.render(&self.date_format)?;

        if self.create_dir_if_missing {
            std::fs::create_dir_all(&self.output_dir)?;
        }

        let mut written = self.written.lock().unwrap_or_else(|e| e.into_inner());
        let mut path = self.path_for(document);
        if written.contains(&path) {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let id = sanitize_filename(&document.metadata().video_id);
            path = self.output_dir.join(format!("{}_{}.md", stem, id));
            warn!("File name already used in this run, writing {}", path.display());
        }

        std::fs::write(&path, content)?;
        written.insert(path.clone());
        info!("Summary saved to {}", path.display());
        Ok(path)
    }
}

use anyhow::{Context, Result};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{Document, LoadedDocument};

/// Why a document was left out of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Blank file, `null`, `{}` or `[]`
    Empty,
    /// Not well-formed JSON
    Malformed(String),
    /// Valid JSON, but not a page of games
    UnexpectedShape(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Empty => write!(f, "empty document"),
            SkipReason::Malformed(e) => write!(f, "invalid JSON ({})", e),
            SkipReason::UnexpectedShape(e) => write!(f, "not a games page ({})", e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkippedDocument {
    pub source: PathBuf,
    pub reason: SkipReason,
}

/// Result of loading a batch of files
#[derive(Debug, Default)]
pub struct LoadReport {
    pub documents: Vec<LoadedDocument>,
    pub skipped: Vec<SkippedDocument>,
}

/// Find exported pages in `input_dir` whose file name matches `pattern`.
///
/// Paths come back sorted so repeated runs see documents in the same order.
pub fn discover(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let escaped_dir = glob::Pattern::escape(&input_dir.to_string_lossy());
    let full_pattern = format!("{}/{}", escaped_dir, pattern);

    let mut paths = Vec::new();
    for entry in glob::glob(&full_pattern)
        .with_context(|| format!("Invalid file pattern '{}'", pattern))?
    {
        let path = entry.context("Failed to read directory entry")?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parse the text of one exported page.
pub fn parse_document(text: &str) -> Result<Document, SkipReason> {
    if text.trim().is_empty() {
        return Err(SkipReason::Empty);
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| SkipReason::Malformed(e.to_string()))?;

    let is_empty = match &value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if is_empty {
        return Err(SkipReason::Empty);
    }

    serde_json::from_value(value).map_err(|e| SkipReason::UnexpectedShape(e.to_string()))
}

/// Read and parse every path.
///
/// Unreadable files are an error; files that read fine but don't parse as a
/// games page are recorded in [`LoadReport::skipped`] and otherwise ignored.
pub fn load_documents(paths: &[PathBuf]) -> Result<LoadReport> {
    let mut report = LoadReport::default();

    for path in paths {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        match parse_document(&text) {
            Ok(document) => report.documents.push(LoadedDocument {
                source: path.clone(),
                document,
            }),
            Err(reason) => report.skipped.push(SkippedDocument {
                source: path.clone(),
                reason,
            }),
        }
    }

    Ok(report)
}

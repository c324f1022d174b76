//! Loader types

use crate::document::DocumentStream;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// File contents keyed by path; iteration is sorted by path
pub type ProjectFiles = BTreeMap<PathBuf, String>;

/// A file that could not be parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseFailure {
    /// File path
    pub path: PathBuf,
    /// Error message, including a snippet of the file
    pub message: String,
}

/// Parsed streams of a project
#[derive(Debug, Clone, Default)]
pub struct ParsedProject {
    /// Streams keyed by path
    pub streams: BTreeMap<PathBuf, DocumentStream>,
    /// Files skipped because they did not parse
    pub failures: Vec<ParseFailure>,
}

impl ParsedProject {
    /// Total number of parsed documents
    pub fn document_count(&self) -> usize {
        self.streams.values().map(DocumentStream::len).sum()
    }
}

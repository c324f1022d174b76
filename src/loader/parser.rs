//! Stream parsing for loaded files

use super::types::{ParseFailure, ParsedProject, ProjectFiles};
use crate::document::DocumentStream;
use crate::error::Result;
use std::path::Path;

/// Parse one file's content
pub fn parse_file(path: impl AsRef<Path>, content: &str) -> Result<DocumentStream> {
    DocumentStream::parse(content, &path.as_ref().display().to_string())
}

/// Parse every file; a file that fails to parse is skipped and reported
pub fn parse_project(files: &ProjectFiles) -> ParsedProject {
    let mut project = ParsedProject::default();
    for (path, content) in files {
        match parse_file(path, content) {
            Ok(stream) => {
                project.streams.insert(path.clone(), stream);
            }
            Err(e) => {
                tracing::error!("{}", e);
                project.failures.push(ParseFailure {
                    path: path.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Parsed {} documents from {} files",
        project.document_count(),
        project.streams.len()
    );
    project
}

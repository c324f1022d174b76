//! Filesystem access
//!
//! Walks a project with `walkdir`, pruning excluded directories before
//! descending into them. Unreadable files are reported and skipped.

use super::types::ProjectFiles;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Read every metadata file under `dir`
pub fn read_project(dir: impl AsRef<Path>, config: &GeneratorConfig) -> Result<ProjectFiles> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::file_not_found(dir.display().to_string()));
    }

    let mut files = ProjectFiles::new();
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Error walking {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let selected = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| config.reads_extension(ext));
        if !selected {
            continue;
        }

        match fs::read_to_string(path) {
            Ok(content) => {
                files.insert(path.to_path_buf(), content);
            }
            Err(e) => tracing::warn!("Error reading file {}: {}", path.display(), e),
        }
    }

    tracing::info!(
        "Found {} metadata files (excluding {})",
        files.len(),
        config.excluded_dirs.join(", ")
    );
    Ok(files)
}

fn is_excluded(entry: &DirEntry, config: &GeneratorConfig) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.excluded_dirs.iter().any(|d| d == name))
}

/// Read a file that must exist
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::file_not_found(path.display().to_string()),
        _ => Error::Io(e),
    })
}

/// Read a file that may not exist yet
pub fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    match fs::read_to_string(path.as_ref()) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::Io(e)),
    }
}

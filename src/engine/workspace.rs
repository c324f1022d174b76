//! In-memory working set of parsed files
//!
//! Every file is parsed once and edited in place, even when it plays more
//! than one role in a pass (a types file that also holds the link, say).
//! At the end each stream is rendered and compared with the text it was
//! read from; only differing files become writes.

use super::types::FileWrite;
use crate::document::DocumentStream;
use crate::error::Result;
use crate::loader::parse_file;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct WorkFile {
    original: Option<String>,
    stream: DocumentStream,
}

/// Parsed files keyed by path
#[derive(Debug, Default)]
pub(crate) struct Workspace {
    files: BTreeMap<PathBuf, WorkFile>,
}

impl Workspace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Parse `content` as `path`; `None` starts an empty, not yet existing file.
    /// Opening a path twice keeps the first parse.
    pub(crate) fn open(&mut self, path: &Path, content: Option<&str>) -> Result<()> {
        if self.files.contains_key(path) {
            return Ok(());
        }
        let stream = match content {
            Some(text) => parse_file(path, text)?,
            None => DocumentStream::new(),
        };
        self.insert(path, content.map(str::to_string), stream);
        Ok(())
    }

    /// Add an already parsed stream
    pub(crate) fn insert(&mut self, path: &Path, original: Option<String>, stream: DocumentStream) {
        self.files
            .entry(path.to_path_buf())
            .or_insert(WorkFile { original, stream });
    }

    pub(crate) fn stream(&self, path: &Path) -> Option<&DocumentStream> {
        self.files.get(path).map(|f| &f.stream)
    }

    pub(crate) fn stream_mut(&mut self, path: &Path) -> Option<&mut DocumentStream> {
        self.files.get_mut(path).map(|f| &mut f.stream)
    }

    /// Paths and streams, in path order
    pub(crate) fn streams(&self) -> impl Iterator<Item = (&Path, &DocumentStream)> {
        self.files.iter().map(|(p, f)| (p.as_path(), &f.stream))
    }

    pub(crate) fn streams_mut(&mut self) -> impl Iterator<Item = (&Path, &mut DocumentStream)> {
        self.files
            .iter_mut()
            .map(|(p, f)| (p.as_path(), &mut f.stream))
    }

    /// Render every file and keep those whose text changed
    pub(crate) fn into_writes(self) -> Result<Vec<FileWrite>> {
        let mut writes = Vec::new();
        for (path, file) in self.files {
            let rendered = file.stream.render()?;
            match &file.original {
                Some(original) if *original == rendered => {
                    tracing::debug!("{} unchanged", path.display());
                }
                // Nothing generated into a file that does not exist
                None if file.stream.is_empty() => {}
                original => writes.push(FileWrite {
                    path,
                    content: rendered,
                    created: original.is_none(),
                }),
            }
        }
        Ok(writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALAR: &str = "kind: ScalarType\nversion: v1\ndefinition:\n  name: Int32\n";

    #[test]
    fn test_unchanged_files_are_not_written() {
        let mut workspace = Workspace::new();
        workspace.open(Path::new("a.hml"), Some(SCALAR)).unwrap();
        assert!(workspace.into_writes().unwrap().is_empty());
    }

    #[test]
    fn test_empty_new_file_is_not_written() {
        let mut workspace = Workspace::new();
        workspace.open(Path::new("new.hml"), None).unwrap();
        assert!(workspace.stream(Path::new("new.hml")).unwrap().is_empty());
        assert!(workspace.into_writes().unwrap().is_empty());
    }

    #[test]
    fn test_first_open_wins() {
        let mut workspace = Workspace::new();
        workspace.open(Path::new("a.hml"), Some(SCALAR)).unwrap();
        workspace.open(Path::new("a.hml"), None).unwrap();
        assert_eq!(workspace.stream(Path::new("a.hml")).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_error_propagates() {
        let mut workspace = Workspace::new();
        let err = workspace
            .open(Path::new("bad.hml"), Some("kind: [unclosed\n"))
            .unwrap_err();
        assert!(err.to_string().contains("bad.hml"));
    }
}

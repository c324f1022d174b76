//! Multi-document stream codec
//!
//! Splits `---`-separated streams into entries that remember their raw
//! text and the separator line preceding them. Rendering writes untouched
//! entries back verbatim and re-serializes only edited or appended ones,
//! so formatting, comments and quoting of everything else survive.

use super::types::Document;
use crate::error::{Error, Result};
use crate::types::{DocumentKind, YamlValue};

/// Separator written before appended documents
const SEPARATOR: &str = "---\n";

/// A document marker: `---` at column 0, alone or followed by a comment.
/// An indented `---` belongs to a block scalar.
fn is_separator(line: &str) -> bool {
    match line.trim_end().strip_prefix("---") {
        Some("") => true,
        Some(rest) => rest.starts_with([' ', '\t']) && rest.trim_start().starts_with('#'),
        None => false,
    }
}

/// One `---`-delimited section of a stream
#[derive(Debug, Clone)]
struct StreamEntry {
    /// Separator line preceding this entry, as written
    separator: Option<String>,
    /// Text as read from disk
    raw: String,
    /// Parsed document; `None` for blank, comment-only or kind-less sections
    document: Option<Document>,
    /// Whether `raw` is stale and the document must be re-serialized
    dirty: bool,
}

impl StreamEntry {
    fn render(&self) -> Result<String> {
        match (&self.document, self.dirty) {
            (Some(document), true) => Ok(serde_yaml::to_string(document.value())?),
            _ => Ok(self.raw.clone()),
        }
    }
}

/// An ordered stream of documents read from one file
#[derive(Debug, Clone, Default)]
pub struct DocumentStream {
    entries: Vec<StreamEntry>,
}

impl DocumentStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stream content; `file` is only used for error reporting
    pub fn parse(content: &str, file: &str) -> Result<Self> {
        let mut stream = Self::new();
        let mut separator: Option<String> = None;
        let mut raw = String::new();

        for line in content.split_inclusive('\n') {
            if is_separator(line) {
                if separator.is_some() || !raw.is_empty() {
                    stream.push_raw(separator.take(), std::mem::take(&mut raw), content, file)?;
                }
                separator = Some(line.to_string());
            } else {
                raw.push_str(line);
            }
        }
        if separator.is_some() || !raw.is_empty() {
            stream.push_raw(separator, raw, content, file)?;
        }

        Ok(stream)
    }

    fn push_raw(
        &mut self,
        separator: Option<String>,
        raw: String,
        content: &str,
        file: &str,
    ) -> Result<()> {
        let document = if raw.trim().is_empty() {
            None
        } else {
            let value: YamlValue = serde_yaml::from_str(&raw)
                .map_err(|e| Error::parse(file, e.to_string(), content))?;
            let document = Document::from_value(value);
            if document.is_none() {
                tracing::debug!("Skipping section without a kind in {}", file);
            }
            document
        };

        self.entries.push(StreamEntry {
            separator,
            raw,
            document,
            dirty: false,
        });
        Ok(())
    }

    /// Parsed documents in stream order
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter().filter_map(|e| e.document.as_ref())
    }

    /// Parsed documents of one kind
    pub fn documents_of<'a>(
        &'a self,
        kind: &'a DocumentKind,
    ) -> impl Iterator<Item = &'a Document> + 'a {
        self.documents().filter(move |d| d.kind() == kind)
    }

    /// Number of parsed documents
    pub fn len(&self) -> usize {
        self.documents().count()
    }

    /// Whether the stream holds no parsed documents
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a document; it is serialized on render
    pub fn push(&mut self, document: Document) {
        self.entries.push(StreamEntry {
            separator: Some(SEPARATOR.to_string()),
            raw: String::new(),
            document: Some(document),
            dirty: true,
        });
    }

    /// Remove every document for which `keep` returns false, returning them.
    /// A removed document takes its preceding separator with it.
    pub fn retain<F>(&mut self, mut keep: F) -> Vec<Document>
    where
        F: FnMut(&Document) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            match &entry.document {
                Some(document) if !keep(document) => removed.push(document.clone()),
                _ => kept.push(entry),
            }
        }
        self.entries = kept;
        removed
    }

    /// Apply `edit` to every document; an edit reports whether it changed
    /// anything, and only changed documents are re-serialized
    pub fn update<F>(&mut self, mut edit: F) -> usize
    where
        F: FnMut(&mut Document) -> bool,
    {
        let mut changed = 0;
        for entry in &mut self.entries {
            if let Some(document) = entry.document.as_mut() {
                if edit(document) {
                    entry.dirty = true;
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Render the stream back to text
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let separator = match &entry.separator {
                Some(separator) => Some(separator.as_str()),
                // Appending after a separator-less first section needs one
                None if index > 0 => Some(SEPARATOR),
                None => None,
            };
            if let Some(separator) = separator {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(separator);
                if !separator.ends_with('\n') {
                    out.push('\n');
                }
            }
            out.push_str(&entry.render()?);
        }
        Ok(out)
    }
}

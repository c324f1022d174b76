//! Stream-level edits: removing and appending whole documents

use super::types::Replacement;
use crate::document::{Document, DocumentStream};
use crate::types::DocumentKind;

/// Remove every document of `kinds`, then append `generated`.
///
/// Running this again with the same generated set renders the same text,
/// since appended documents always go after everything that was kept.
pub fn strip_and_append(
    stream: &mut DocumentStream,
    kinds: &[DocumentKind],
    generated: impl IntoIterator<Item = Document>,
) -> Replacement {
    let removed = stream.retain(|d| !kinds.contains(d.kind())).len();
    let appended = append_documents(stream, generated);
    tracing::debug!(
        "Replaced {} generated documents with {}",
        removed,
        appended
    );
    Replacement { removed, appended }
}

/// Remove every document of `kinds`, returning the removed documents' names
pub fn strip_kinds(stream: &mut DocumentStream, kinds: &[DocumentKind]) -> Vec<String> {
    stream
        .retain(|d| !kinds.contains(d.kind()))
        .iter()
        .map(|d| d.name().unwrap_or_default().to_string())
        .collect()
}

/// Append documents in order; returns how many were appended
pub fn append_documents(
    stream: &mut DocumentStream,
    documents: impl IntoIterator<Item = Document>,
) -> usize {
    let mut appended = 0;
    for document in documents {
        stream.push(document);
        appended += 1;
    }
    appended
}

//! Merge outcome types

use serde::Serialize;

/// Result of replacing generated documents in a stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// Documents removed
    pub removed: usize,
    /// Documents appended
    pub appended: usize,
}

/// Result of patching model documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelPatch {
    /// Models that received at least one field
    pub patched: Vec<String>,
    /// Models that already had every field
    pub unchanged: Vec<String>,
    /// Models skipped for lack of a paired expression
    pub skipped: Vec<String>,
}

impl ModelPatch {
    /// Whether any model changed
    pub fn changed(&self) -> bool {
        !self.patched.is_empty()
    }

    /// Fold another patch result into this one
    pub fn merge(&mut self, other: ModelPatch) {
        self.patched.extend(other.patched);
        self.unchanged.extend(other.unchanged);
        self.skipped.extend(other.skipped);
    }
}

/// What happened to a `GraphqlConfig` aggregate section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionOutcome {
    /// Section inserted
    Inserted,
    /// Section already present, nothing done
    Present,
    /// No `GraphqlConfig` document in the stream
    NotFound,
}

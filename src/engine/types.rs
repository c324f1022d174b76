//! Engine types
//!
//! Planned writes and per-pass reports.

use crate::loader::ParseFailure;
use crate::matcher::MatchOutcome;
use crate::merge::{ModelPatch, Replacement, SectionOutcome};
use crate::synth::SynthesisReport;
use crate::types::Pass;
use serde::Serialize;
use std::path::PathBuf;

/// A file the pass wants written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileWrite {
    /// Destination
    pub path: PathBuf,
    /// Full new content
    #[serde(skip)]
    pub content: String,
    /// Whether the file does not exist yet
    pub created: bool,
}

/// Outcome of a pass: what to write and what happened
#[derive(Debug, Clone, Serialize)]
pub struct Plan<R> {
    /// Which pass produced this plan
    pub pass: Pass,
    /// Files whose content changed, sorted by path
    pub writes: Vec<FileWrite>,
    /// Pass diagnostics
    pub report: R,
}

impl<R> Plan<R> {
    /// Whether the pass changes nothing on disk
    pub fn is_noop(&self) -> bool {
        self.writes.is_empty()
    }

    /// The planned write for `path`, if any
    pub fn write_for(&self, path: &std::path::Path) -> Option<&FileWrite> {
        self.writes.iter().find(|w| w.path == path)
    }
}

/// Matching diagnostics, flattened for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    /// Matched object types
    pub matched: usize,
    /// Connector object types with no local counterpart
    pub unmatched: Vec<String>,
    /// Connector object types dropped because an earlier link supplied them
    pub duplicates: Vec<String>,
    /// Local object types hidden by an earlier declaration with the same key
    pub shadowed: Vec<String>,
}

impl From<&MatchOutcome> for MatchSummary {
    fn from(outcome: &MatchOutcome) -> Self {
        Self {
            matched: outcome.table.len(),
            unmatched: outcome.unmatched.clone(),
            duplicates: outcome
                .duplicates
                .iter()
                .map(|d| format!("{} ({})", d.connector_type, d.dropped.link))
                .collect(),
            shadowed: outcome.shadowed.clone(),
        }
    }
}

/// Report of the boolean pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BooleanReport {
    /// Files parsed successfully
    pub files: usize,
    /// Files skipped because they failed to parse
    pub parse_failures: Vec<ParseFailure>,
    /// Type matching
    pub matching: MatchSummary,
    /// Scalar boolean expressions generated
    pub scalar_expressions: usize,
    /// Object boolean expressions generated
    pub object_expressions: usize,
    /// Synthesis diagnostics
    pub synthesis: SynthesisReport,
    /// Names of removed legacy documents
    pub legacy_removed: Vec<String>,
    /// Output file replacement
    pub output: Replacement,
    /// `filterExpressionType` patches
    pub models: ModelPatch,
}

/// Report of the aggregate pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    /// Model files skipped because they failed to parse
    pub parse_failures: Vec<ParseFailure>,
    /// Type matching
    pub matching: MatchSummary,
    /// `ScalarType` documents added to the types file
    pub scalar_types_added: usize,
    /// Representation documents added to the types file
    pub representations_added: usize,
    /// Scalar aggregate expressions generated
    pub scalar_expressions: usize,
    /// Object aggregate expressions generated
    pub object_expressions: usize,
    /// Synthesis diagnostics
    pub synthesis: SynthesisReport,
    /// Output file replacement
    pub output: Replacement,
    /// `aggregateExpression` patches
    pub models: ModelPatch,
    /// `GraphqlConfig` aggregate section
    pub graphql_config: SectionOutcome,
}

/// Files the aggregate pass reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateTargets {
    /// File holding the `DataConnectorLink`
    pub link_file: PathBuf,
    /// File receiving generated scalar declarations
    pub types_file: PathBuf,
    /// Files holding `Model`s and `ObjectType`s
    pub model_files: Vec<PathBuf>,
    /// File receiving generated aggregate expressions
    pub output_file: PathBuf,
    /// File holding the `GraphqlConfig`
    pub graphql_config: PathBuf,
}

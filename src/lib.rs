// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # hml-expressions
//!
//! Generates filter and aggregate metadata for HML projects.
//!
//! Hasura DDN metadata describes connector-backed types in `---`-separated
//! YAML streams. Writing a `BooleanExpressionType` and an
//! `AggregateExpression` for every scalar and object type by hand is
//! repetitive; this crate derives them from what the connector links
//! report and merges them back into the project without disturbing
//! hand-written documents.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hml_expressions::{engine::Generator, loader::read_project, GeneratorConfig};
//! use std::path::Path;
//!
//! let config = GeneratorConfig::default();
//! let files = read_project("app", &config)?;
//! let plan = Generator::new(config).boolean(&files, Path::new("app/metadata/filters.hml"))?;
//! for write in &plan.writes {
//!     std::fs::write(&write.path, &write.content)?;
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!  files ──► loader ──► document streams ──► classify ──► matcher
//!                                                            │
//!                   merge ◄── synth (scalar, then object) ◄──┘
//!                     │
//!                     └──► engine::Plan (changed files only)
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the generator
pub mod error;

/// Common types and type aliases
pub mod types;

/// Name normalization
pub mod naming;

/// Generator configuration
pub mod config;

/// Documents and the multi-document stream codec
pub mod document;

/// Document classification
pub mod classify;

/// Connector-to-local type matching
pub mod matcher;

/// Expression synthesis
pub mod synth;

/// Idempotent document merging
pub mod merge;

/// Project file discovery and parsing
pub mod loader;

/// Pass orchestration
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

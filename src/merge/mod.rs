//! Document merge module
//!
//! Idempotent, kind-aware edits of document streams.
//!
//! # Overview
//!
//! The merge module provides:
//! - Stream edits: strip generated or legacy kinds, append documents
//! - Model patches: reference generated expressions from `Model`s
//! - `GraphqlConfig` patch: insert the aggregate query section
//!
//! Edits never touch documents they do not change, so those render back
//! verbatim. Callers decide whether to write a file by comparing the
//! rendered stream with the original text.

mod edits;
mod patch;
mod types;

pub use edits::{append_documents, strip_and_append, strip_kinds};
pub use patch::{ensure_graphql_aggregate_section, patch_model_aggregates, patch_model_filter};
pub use types::{ModelPatch, Replacement, SectionOutcome};

//! Project loader module
//!
//! Read metadata files from a project directory and parse them into
//! document streams.
//!
//! # Overview
//!
//! The loader module provides:
//! - `read_project` - Collect metadata files under a directory
//! - `parse_project` - Parse every file, isolating per-file parse errors
//! - Single-file helpers for the explicitly named files of the aggregate pass

mod parser;
mod reader;
mod types;

pub use parser::{parse_file, parse_project};
pub use reader::{read_file, read_optional, read_project};
pub use types::{ParseFailure, ParsedProject, ProjectFiles};

#[cfg(test)]
mod tests;

//! Error types for hml-expressions
//!
//! This module defines the error hierarchy for the whole generator.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Only structural failures are errors. Unresolved references, duplicate
//! names and unmatched types are logged and recorded in the pass reports
//! instead, so one bad document never hides the rest of a project.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hml-expressions
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Document Errors
    // ============================================================================
    #[error("Error parsing YAML in file {file}:\n{message}\nFile snippet:\n{snippet}")]
    Parse {
        file: String,
        message: String,
        snippet: String,
    },

    #[error("No DataConnectorLink found in {}", path.display())]
    MissingLink { path: PathBuf },

    #[error("Invalid {kind} document: {message}")]
    InvalidDocument { kind: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Number of leading lines kept in a parse error snippet
const SNIPPET_LINES: usize = 5;

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a parse error carrying the first lines of the offending content
    pub fn parse(file: impl Into<String>, message: impl Into<String>, content: &str) -> Self {
        let snippet = content
            .lines()
            .take(SNIPPET_LINES)
            .collect::<Vec<_>>()
            .join("\n");
        Self::Parse {
            file: file.into(),
            message: message.into(),
            snippet,
        }
    }

    /// Create a missing link error
    pub fn missing_link(path: impl Into<PathBuf>) -> Self {
        Self::MissingLink { path: path.into() }
    }

    /// Create an invalid document error
    pub fn invalid_document(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

/// Result type alias for hml-expressions
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

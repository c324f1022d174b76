//! Common types used throughout hml-expressions
//!
//! This module contains shared type definitions, type aliases,
//! and the document kind vocabulary used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// YAML value type (re-exported from serde_yaml)
pub type YamlValue = serde_yaml::Value;

/// YAML mapping type
pub type YamlMapping = serde_yaml::Mapping;

// ============================================================================
// Document Kind
// ============================================================================

/// Metadata document kind, as found in the `kind` field of every document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentKind {
    ObjectType,
    ScalarType,
    DataConnectorScalarRepresentation,
    DataConnectorLink,
    Model,
    AggregateExpression,
    BooleanExpressionType,
    /// Pre-`BooleanExpressionType` object filter documents
    ObjectBooleanExpressionType,
    GraphqlConfig,
    Connector,
    Other(String),
}

impl DocumentKind {
    /// The kind name as written in documents
    pub fn as_str(&self) -> &str {
        match self {
            DocumentKind::ObjectType => "ObjectType",
            DocumentKind::ScalarType => "ScalarType",
            DocumentKind::DataConnectorScalarRepresentation => "DataConnectorScalarRepresentation",
            DocumentKind::DataConnectorLink => "DataConnectorLink",
            DocumentKind::Model => "Model",
            DocumentKind::AggregateExpression => "AggregateExpression",
            DocumentKind::BooleanExpressionType => "BooleanExpressionType",
            DocumentKind::ObjectBooleanExpressionType => "ObjectBooleanExpressionType",
            DocumentKind::GraphqlConfig => "GraphqlConfig",
            DocumentKind::Connector => "Connector",
            DocumentKind::Other(name) => name,
        }
    }
}

impl From<&str> for DocumentKind {
    fn from(kind: &str) -> Self {
        match kind {
            "ObjectType" => DocumentKind::ObjectType,
            "ScalarType" => DocumentKind::ScalarType,
            "DataConnectorScalarRepresentation" => DocumentKind::DataConnectorScalarRepresentation,
            "DataConnectorLink" => DocumentKind::DataConnectorLink,
            "Model" => DocumentKind::Model,
            "AggregateExpression" => DocumentKind::AggregateExpression,
            "BooleanExpressionType" => DocumentKind::BooleanExpressionType,
            "ObjectBooleanExpressionType" => DocumentKind::ObjectBooleanExpressionType,
            "GraphqlConfig" => DocumentKind::GraphqlConfig,
            "Connector" => DocumentKind::Connector,
            other => DocumentKind::Other(other.to_string()),
        }
    }
}

impl From<String> for DocumentKind {
    fn from(kind: String) -> Self {
        DocumentKind::from(kind.as_str())
    }
}

impl From<DocumentKind> for String {
    fn from(kind: DocumentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Pass
// ============================================================================

/// Which generation pass produced a set of documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Boolean expression types (filtering)
    Boolean,
    /// Aggregate expressions (summarizing)
    Aggregate,
}

impl Pass {
    /// Kind of the documents this pass owns in its output file
    pub fn output_kind(self) -> DocumentKind {
        match self {
            Pass::Boolean => DocumentKind::BooleanExpressionType,
            Pass::Aggregate => DocumentKind::AggregateExpression,
        }
    }
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::Boolean => write!(f, "boolean"),
            Pass::Aggregate => write!(f, "aggregate"),
        }
    }
}

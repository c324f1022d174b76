//! Generator configuration
//!
//! Naming conventions, file selection and default sections used by the
//! generator. Every field has a default, so an empty YAML file (or no file
//! at all) yields the conventional output.
//!
//! ```yaml
//! boolean_suffix: BoolExp
//! aggregate_suffix: _aggregate_exp
//! excluded_dirs: [node_modules, .cache]
//! graphql_aggregate:
//!   count_field_name: _count
//! ```

use crate::error::{Error, Result};
use crate::types::DocumentKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Version written into generated documents
    pub document_version: String,

    /// Suffix of generated boolean expression names
    pub boolean_suffix: String,

    /// Suffix of generated aggregate expression names
    pub aggregate_suffix: String,

    /// Document kinds removed from every rewritten file by the boolean pass
    pub legacy_kinds: Vec<String>,

    /// Directory names never descended into
    pub excluded_dirs: Vec<String>,

    /// File extensions read from a project
    pub extensions: Vec<String>,

    /// File extensions the boolean pass may rewrite
    pub rewrite_extensions: Vec<String>,

    /// Section inserted under `GraphqlConfig.definition.query.aggregate`
    pub graphql_aggregate: GraphqlAggregateConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            document_version: default_document_version(),
            boolean_suffix: default_boolean_suffix(),
            aggregate_suffix: default_aggregate_suffix(),
            legacy_kinds: default_legacy_kinds(),
            excluded_dirs: default_excluded_dirs(),
            extensions: default_extensions(),
            rewrite_extensions: default_rewrite_extensions(),
            graphql_aggregate: GraphqlAggregateConfig::default(),
        }
    }
}

fn default_document_version() -> String {
    "v1".to_string()
}

fn default_boolean_suffix() -> String {
    "BoolExp".to_string()
}

fn default_aggregate_suffix() -> String {
    "_aggregate_exp".to_string()
}

fn default_legacy_kinds() -> Vec<String> {
    vec![DocumentKind::ObjectBooleanExpressionType.to_string()]
}

fn default_excluded_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["hml".to_string(), "yaml".to_string(), "yml".to_string()]
}

fn default_rewrite_extensions() -> Vec<String> {
    vec!["hml".to_string()]
}

// ============================================================================
// GraphQL Aggregate Section
// ============================================================================

/// Field names of the GraphQL aggregate query section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphqlAggregateConfig {
    /// Name of the filter input argument
    pub filter_input_field_name: String,
    /// Name of the count field
    pub count_field_name: String,
    /// Name of the distinct count field
    pub count_distinct_field_name: String,
}

impl Default for GraphqlAggregateConfig {
    fn default() -> Self {
        Self {
            filter_input_field_name: "filter_input".to_string(),
            count_field_name: "_count".to_string(),
            count_distinct_field_name: "_count_distinct".to_string(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path.display().to_string())
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string; empty input yields defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: GeneratorConfig = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse generator config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would generate invalid or colliding names
    pub fn validate(&self) -> Result<()> {
        if self.boolean_suffix.is_empty() {
            return Err(Error::config("boolean_suffix cannot be empty"));
        }
        if self.aggregate_suffix.is_empty() {
            return Err(Error::config("aggregate_suffix cannot be empty"));
        }
        if self.boolean_suffix == self.aggregate_suffix {
            return Err(Error::config(
                "boolean_suffix and aggregate_suffix must differ",
            ));
        }
        for suffix in [&self.boolean_suffix, &self.aggregate_suffix] {
            if !suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::config(format!(
                    "Suffix '{suffix}' must only contain letters, digits and underscores"
                )));
            }
        }
        if self.extensions.is_empty() {
            return Err(Error::config("At least one file extension is required"));
        }
        Ok(())
    }

    /// Legacy kinds as document kinds
    pub fn legacy_document_kinds(&self) -> Vec<DocumentKind> {
        self.legacy_kinds
            .iter()
            .map(|k| DocumentKind::from(k.as_str()))
            .collect()
    }

    /// Whether a file with this extension is read
    pub fn reads_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }

    /// Whether a file with this extension may be rewritten by the boolean pass
    pub fn rewrites_extension(&self, extension: &str) -> bool {
        self.rewrite_extensions.iter().any(|e| e == extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.boolean_suffix, "BoolExp");
        assert_eq!(config.aggregate_suffix, "_aggregate_exp");
        assert_eq!(config.document_version, "v1");
        assert_eq!(
            config.legacy_document_kinds(),
            vec![DocumentKind::ObjectBooleanExpressionType]
        );
        assert!(config.reads_extension("yml"));
        assert!(config.rewrites_extension("hml"));
        assert!(!config.rewrites_extension("yaml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(
            GeneratorConfig::from_yaml("  \n").unwrap(),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GeneratorConfig::from_yaml(
            r#"
boolean_suffix: Filter
excluded_dirs: [node_modules, .cache]
graphql_aggregate:
  count_field_name: total
"#,
        )
        .unwrap();
        assert_eq!(config.boolean_suffix, "Filter");
        assert_eq!(config.aggregate_suffix, "_aggregate_exp");
        assert_eq!(config.excluded_dirs.len(), 2);
        assert_eq!(config.graphql_aggregate.count_field_name, "total");
        assert_eq!(
            config.graphql_aggregate.filter_input_field_name,
            "filter_input"
        );
    }

    #[test]
    fn test_invalid_config() {
        assert!(GeneratorConfig::from_yaml("boolean_suffix: ''").is_err());
        assert!(GeneratorConfig::from_yaml("aggregate_suffix: BoolExp").is_err());
        assert!(GeneratorConfig::from_yaml("boolean_suffix: Bool-Exp").is_err());
        assert!(GeneratorConfig::from_yaml("extensions: []").is_err());
        assert!(GeneratorConfig::from_yaml("boolean_suffix: [").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.yaml");
        std::fs::write(&path, "aggregate_suffix: _agg\n").unwrap();
        let config = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(config.aggregate_suffix, "_agg");

        let missing = GeneratorConfig::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(Error::FileNotFound { .. })));
    }
}

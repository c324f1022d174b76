//! Declarations for connector scalars nobody declared

use super::index::{NameRegistry, RepresentationTable};
use super::types::{
    ComparisonExpressionName, GraphqlTypeName, ScalarRepresentationOut, ScalarTypeOut,
};
use crate::config::GeneratorConfig;
use crate::document::{DataConnectorLinkDef, Document, ScalarRepresentationDef};
use crate::error::Result;
use crate::naming::display_name;
use crate::types::DocumentKind;
use std::collections::HashSet;

/// Scalars every project has without declaring them
pub const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

/// Generated declarations for missing scalars
#[derive(Debug, Clone, Default)]
pub struct MissingScalars {
    /// `ScalarType` and `DataConnectorScalarRepresentation` documents,
    /// each type followed by its representation
    pub documents: Vec<Document>,
    /// The generated representations, for the representation table
    pub representations: Vec<ScalarRepresentationDef>,
}

impl MissingScalars {
    /// Whether nothing was missing
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Declare every scalar `link` reports that has no representation on it
/// and is not itself a declared or represented type.
///
/// The local name is `display_name(native)`. Built-in scalars and names
/// already declared only get a representation.
pub fn missing_scalars<'a>(
    link: &DataConnectorLinkDef,
    declared: impl IntoIterator<Item = &'a str>,
    representations: &RepresentationTable,
    config: &GeneratorConfig,
) -> Result<MissingScalars> {
    let declared: HashSet<&str> = declared.into_iter().collect();
    let mut registry = NameRegistry::new();
    let mut missing = MissingScalars::default();

    for native in link.schema.schema.scalar_types.names() {
        if representations.represents(&link.name, native)
            || declared.contains(native)
            || representations.is_representation(native)
        {
            continue;
        }

        let name = display_name(native);
        let has_type = BUILTIN_SCALARS.contains(&name.as_str())
            || declared.contains(name.as_str())
            || representations.is_representation(&name)
            || registry.is_claimed(&name);
        if !has_type {
            // Claimed here so a second native with the same display name
            // only gets a representation
            let _ = registry.claim(&name, native);
            missing.documents.push(Document::from_definition(
                DocumentKind::ScalarType,
                &config.document_version,
                &ScalarTypeOut {
                    name: name.clone(),
                    graphql: GraphqlTypeName {
                        type_name: name.clone(),
                    },
                },
            )?);
        }

        missing.documents.push(Document::from_definition(
            DocumentKind::DataConnectorScalarRepresentation,
            &config.document_version,
            &ScalarRepresentationOut {
                data_connector_name: link.name.clone(),
                data_connector_scalar_type: native.to_string(),
                representation: name.clone(),
                graphql: ComparisonExpressionName {
                    comparison_expression_type_name: format!("{name}ComparisonExp"),
                },
            },
        )?);
        missing.representations.push(ScalarRepresentationDef {
            data_connector_name: Some(link.name.clone()),
            data_connector_scalar_type: native.to_string(),
            representation: name,
        });
    }

    if !missing.is_empty() {
        tracing::info!(
            "Declared {} missing scalar representations for '{}'",
            missing.representations.len(),
            link.name
        );
    }
    Ok(missing)
}

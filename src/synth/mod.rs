//! Expression synthesis module
//!
//! Generates `BooleanExpressionType` and `AggregateExpression` documents
//! from the matched-type table and the scalar representation table.
//!
//! # Stages
//!
//! 1. Scalar expressions, one per represented connector scalar
//! 2. Object expressions, one per matched object type, with fields
//!    resolved against stage 1 and against each other (see [`resolve`])
//!
//! Each stage gets the previous stage's [`ExpressionIndex`] as a snapshot.
//! Generated names are claimed in a [`NameRegistry`]; a second source
//! producing a taken name is dropped and reported.
//!
//! [`missing_scalars`] supplies `ScalarType` and representation documents
//! for connector scalars nobody declared, ahead of aggregate synthesis.

mod aggregate;
mod boolean;
mod index;
pub mod resolve;
mod scalars;
pub mod types;

pub use aggregate::synthesize_aggregate;
pub use boolean::synthesize_boolean;
pub use index::{
    ExpressionIndex, IndexedExpression, NameCollision, NameRegistry, RepresentationTable,
    SkippedScalar, SynthesisReport,
};
pub use scalars::{missing_scalars, MissingScalars, BUILTIN_SCALARS};

use crate::classify::Sourced;
use crate::config::GeneratorConfig;
use crate::document::{ConnectorScalarType, DataConnectorLinkDef, Document};
use crate::matcher::MatchedTypeTable;
use crate::naming::capitalize_first;

/// Everything synthesis reads
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    /// Matched object types
    pub matched: &'a MatchedTypeTable,
    /// Native scalar representations
    pub representations: &'a RepresentationTable,
    /// Connector links, in any order
    pub links: &'a [Sourced<DataConnectorLinkDef>],
    /// Subgraph prefixed to GraphQL type names
    pub subgraph: Option<&'a str>,
    /// Naming conventions
    pub config: &'a GeneratorConfig,
}

impl<'a> SynthesisInput<'a> {
    /// Links sorted by source file, then declaration order
    fn sorted_links(&self) -> Vec<&'a DataConnectorLinkDef> {
        let mut links: Vec<&Sourced<DataConnectorLinkDef>> = self.links.iter().collect();
        links.sort_by(|a, b| a.source.cmp(&b.source));
        links.into_iter().map(|l| &l.item).collect()
    }

    /// Find the connector scalar `native` on the link named `connector`,
    /// or on any link when the representation names no connector
    fn find_scalar(
        &self,
        connector: Option<&str>,
        native: &str,
    ) -> Option<(&'a DataConnectorLinkDef, &'a ConnectorScalarType)> {
        let links = self.sorted_links();
        let lookup = |link: &'a DataConnectorLinkDef| {
            link.schema
                .schema
                .scalar_types
                .get(native)
                .map(|scalar| (link, scalar))
        };
        match connector {
            Some(name) => links
                .iter()
                .copied()
                .filter(|l| l.name == name)
                .find_map(lookup),
            None => links.iter().copied().find_map(lookup),
        }
    }

    /// GraphQL type name: `{Subgraph}_{name}`, or `name` without a subgraph
    fn graphql_type_name(&self, name: &str) -> String {
        match self.subgraph.filter(|s| !s.is_empty()) {
            Some(subgraph) => format!("{}_{}", capitalize_first(subgraph), name),
            None => name.to_string(),
        }
    }
}

/// A generated expression document
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedExpression {
    /// Generated name
    pub name: String,
    /// Scalar representation or object type the expression operates on
    pub operand: String,
    /// The document
    pub document: Document,
}

/// Output of one synthesis run
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    /// Scalar expressions, sorted by native scalar
    pub scalars: Vec<GeneratedExpression>,
    /// Object expressions, sorted by normalized object type name
    pub objects: Vec<GeneratedExpression>,
    /// Diagnostics
    pub report: SynthesisReport,
}

impl Synthesis {
    /// All documents, scalar expressions first
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.scalars
            .iter()
            .chain(self.objects.iter())
            .map(|e| &e.document)
    }

    /// The object expression operating on `object_type`
    pub fn object_expression(&self, object_type: &str) -> Option<&GeneratedExpression> {
        self.objects.iter().find(|e| e.operand == object_type)
    }

    /// The scalar expression operating on `representation`
    pub fn scalar_expression(&self, representation: &str) -> Option<&GeneratedExpression> {
        self.scalars.iter().find(|e| e.operand == representation)
    }

    /// Number of generated documents
    pub fn len(&self) -> usize {
        self.scalars.len() + self.objects.len()
    }

    /// Whether nothing was generated
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

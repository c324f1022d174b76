//! Document classifier
//!
//! Buckets parsed documents by kind into the typed groups the matcher and
//! synthesizer consume. Files are hand-edited, so a document that does not
//! decode is skipped with a diagnostic and never fails the run.

use crate::document::{
    ConnectorDef, DataConnectorLinkDef, Document, DocumentStream, ModelDef, ObjectTypeDef,
    ScalarRepresentationDef, ScalarTypeDef,
};
use crate::error::Result;
use crate::types::DocumentKind;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// A decoded definition together with the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    /// File the document was read from
    pub source: PathBuf,
    /// Decoded definition
    pub item: T,
}

impl<T> Sourced<T> {
    /// Wrap a definition with its source file
    pub fn new(source: impl Into<PathBuf>, item: T) -> Self {
        Self {
            source: source.into(),
            item,
        }
    }
}

/// Documents grouped by kind, in input order
#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// `ObjectType` declarations
    pub object_types: Vec<Sourced<ObjectTypeDef>>,
    /// `ScalarType` declarations
    pub scalar_types: Vec<Sourced<ScalarTypeDef>>,
    /// `DataConnectorScalarRepresentation` declarations
    pub representations: Vec<Sourced<ScalarRepresentationDef>>,
    /// `DataConnectorLink` declarations with their connector schemas
    pub links: Vec<Sourced<DataConnectorLinkDef>>,
    /// `Model` declarations
    pub models: Vec<Sourced<ModelDef>>,
    /// Subgraph from the first `Connector` declaring one
    pub subgraph: Option<String>,
    /// Files holding a `GraphqlConfig`
    pub graphql_configs: Vec<PathBuf>,
    /// Documents skipped because they did not decode
    pub skipped: usize,
}

impl Classified {
    /// Classify every document of every stream, in iteration order
    pub fn from_streams<'a, I>(streams: I) -> Self
    where
        I: IntoIterator<Item = (&'a Path, &'a DocumentStream)>,
    {
        let mut classified = Self::default();
        for (source, stream) in streams {
            for document in stream.documents() {
                classified.add(source, document);
            }
        }
        classified
    }

    /// Classify a single document
    pub fn add(&mut self, source: &Path, document: &Document) {
        match document.kind() {
            DocumentKind::ObjectType => {
                if let Some(def) = self.decode::<ObjectTypeDef>(source, document) {
                    self.object_types.push(Sourced::new(source, def));
                }
            }
            DocumentKind::ScalarType => {
                if let Some(def) = self.decode::<ScalarTypeDef>(source, document) {
                    self.scalar_types.push(Sourced::new(source, def));
                }
            }
            DocumentKind::DataConnectorScalarRepresentation => {
                match self.decode::<ScalarRepresentationDef>(source, document) {
                    Some(def)
                        if !def.data_connector_scalar_type.is_empty()
                            && !def.representation.is_empty() =>
                    {
                        self.representations.push(Sourced::new(source, def));
                    }
                    Some(def) => {
                        tracing::debug!(
                            "Representation with empty scalar type or representation in {}: {:?}",
                            source.display(),
                            def
                        );
                        self.skipped += 1;
                    }
                    None => {}
                }
            }
            DocumentKind::DataConnectorLink => {
                if let Some(def) = self.decode::<DataConnectorLinkDef>(source, document) {
                    tracing::debug!(
                        "DataConnectorLink '{}' reports {} scalar types and {} object types",
                        def.name,
                        def.schema.schema.scalar_types.len(),
                        def.schema.schema.object_types.len()
                    );
                    self.links.push(Sourced::new(source, def));
                }
            }
            DocumentKind::Model => {
                if let Some(def) = self.decode::<ModelDef>(source, document) {
                    self.models.push(Sourced::new(source, def));
                }
            }
            DocumentKind::Connector => {
                if let Some(def) = self.decode::<ConnectorDef>(source, document) {
                    if self.subgraph.is_none() {
                        self.subgraph = def.subgraph;
                    }
                }
            }
            DocumentKind::GraphqlConfig => {
                if !self.graphql_configs.iter().any(|p| p == source) {
                    self.graphql_configs.push(source.to_path_buf());
                }
            }
            _ => {}
        }
    }

    fn decode<T: DeserializeOwned>(&mut self, source: &Path, document: &Document) -> Option<T> {
        let decoded: Result<T> = document.decode();
        match decoded {
            Ok(def) => Some(def),
            Err(e) => {
                tracing::debug!("Problematic document in {}: {}", source.display(), e);
                self.skipped += 1;
                None
            }
        }
    }

    /// Names of declared `ScalarType`s
    pub fn scalar_type_names(&self) -> impl Iterator<Item = &str> {
        self.scalar_types.iter().map(|s| s.item.name.as_str())
    }

    /// Look up a declared object type by exact name
    pub fn object_type(&self, name: &str) -> Option<&ObjectTypeDef> {
        self.object_types
            .iter()
            .map(|o| &o.item)
            .find(|o| o.name == name)
    }

    /// Total number of classified documents
    pub fn total(&self) -> usize {
        self.object_types.len()
            + self.scalar_types.len()
            + self.representations.len()
            + self.links.len()
            + self.models.len()
    }
}

//! Metadata document module
//!
//! Documents and the `---`-separated streams they are stored in.
//!
//! # Overview
//!
//! The document module provides:
//! - `Document` - A `kind`/`version`/`definition` record
//! - `DocumentStream` - A file's documents with verbatim write-back
//! - Typed views of the definitions the generator reads

mod stream;
mod types;

pub use stream::DocumentStream;
pub use types::{
    AggregateFunctionDef, Catalog, ConnectorDef, ConnectorScalarType, ConnectorSchema,
    ConnectorTypeRef, DataConnectorLinkDef, Document, FieldDef, LinkSchema, ModelDef,
    ObjectTypeDef, ResultType, ScalarRepresentationDef, ScalarTypeDef, TypeMapping, TypeReference,
};

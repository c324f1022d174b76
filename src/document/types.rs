//! Document types
//!
//! A [`Document`] keeps the complete parsed mapping so edits never lose
//! keys the generator does not know about. Typed views over a document's
//! `definition` are decoded on demand with [`Document::decode`].

use crate::error::{Error, Result};
use crate::types::{DocumentKind, YamlMapping, YamlValue};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

// ============================================================================
// Document
// ============================================================================

/// A single metadata document: `kind`, `version` and a kind-specific `definition`
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    kind: DocumentKind,
    value: YamlValue,
}

impl Document {
    /// Build a document from its parts, keys ordered `kind`, `version`, `definition`
    pub fn new(kind: DocumentKind, version: &str, definition: YamlValue) -> Self {
        let mut mapping = YamlMapping::new();
        mapping.insert("kind".into(), kind.as_str().into());
        mapping.insert("version".into(), version.into());
        mapping.insert("definition".into(), definition);
        Self {
            kind,
            value: YamlValue::Mapping(mapping),
        }
    }

    /// Build a document from a serializable definition
    pub fn from_definition<T: Serialize>(
        kind: DocumentKind,
        version: &str,
        definition: &T,
    ) -> Result<Self> {
        Ok(Self::new(kind, version, serde_yaml::to_value(definition)?))
    }

    /// Wrap a parsed value; `None` unless it is a mapping with a string `kind`
    pub fn from_value(value: YamlValue) -> Option<Self> {
        let kind = DocumentKind::from(value.get("kind")?.as_str()?);
        value.is_mapping().then_some(Self { kind, value })
    }

    /// Document kind
    pub fn kind(&self) -> &DocumentKind {
        &self.kind
    }

    /// Document version, usually `v1`
    pub fn version(&self) -> Option<&str> {
        self.value.get("version").and_then(YamlValue::as_str)
    }

    /// The `definition` payload
    pub fn definition(&self) -> Option<&YamlValue> {
        self.value.get("definition")
    }

    /// Mutable `definition` mapping, if the payload is a mapping
    pub fn definition_mut(&mut self) -> Option<&mut YamlMapping> {
        self.value
            .get_mut("definition")
            .and_then(YamlValue::as_mapping_mut)
    }

    /// `definition.name`
    pub fn name(&self) -> Option<&str> {
        self.definition()?.get("name")?.as_str()
    }

    /// The whole document as a YAML value
    pub fn value(&self) -> &YamlValue {
        &self.value
    }

    /// Decode the `definition` payload into a typed view
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let definition = self
            .definition()
            .ok_or_else(|| Error::invalid_document(self.kind.as_str(), "missing definition"))?;
        serde_yaml::from_value(definition.clone())
            .map_err(|e| Error::invalid_document(self.kind.as_str(), e.to_string()))
    }
}

// ============================================================================
// Local Type Definitions
// ============================================================================

/// `ObjectType` definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeDef {
    /// Type name, unique within a subgraph
    pub name: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Explicit bindings to connector object types
    #[serde(default)]
    pub data_connector_type_mapping: Vec<TypeMapping>,
}

impl ObjectTypeDef {
    /// Whether this type is explicitly bound to `native` on connector `connector`
    pub fn is_mapped_to(&self, connector: &str, native: &str) -> bool {
        self.data_connector_type_mapping
            .iter()
            .any(|m| m.data_connector_name == connector && m.data_connector_object_type == native)
    }
}

/// Entry of an object type's `dataConnectorTypeMapping`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMapping {
    /// Connector name
    pub data_connector_name: String,
    /// Connector-native object type
    pub data_connector_object_type: String,
}

/// A field of an object type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub field_type: TypeReference,
}

/// Field type: a type string such as `String!` or `[Track!]`, or a nested `{ type: ... }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TypeReference {
    Named(String),
    Nested {
        #[serde(rename = "type")]
        type_name: String,
    },
}

impl TypeReference {
    /// The type as written, including list brackets and `!`
    pub fn as_str(&self) -> &str {
        match self {
            TypeReference::Named(name) | TypeReference::Nested { type_name: name } => name,
        }
    }
}

/// `ScalarType` definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScalarTypeDef {
    /// Scalar name
    pub name: String,
}

/// `DataConnectorScalarRepresentation` definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarRepresentationDef {
    /// Connector owning the native scalar
    #[serde(default)]
    pub data_connector_name: Option<String>,
    /// Connector-native scalar name
    pub data_connector_scalar_type: String,
    /// Local type representing it
    pub representation: String,
}

/// `Model` definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDef {
    /// Model name
    pub name: String,
    /// Object type backing the model
    #[serde(default)]
    pub object_type: Option<String>,
}

impl ModelDef {
    /// Object type backing the model, falling back to the model name
    pub fn object_type_name(&self) -> &str {
        self.object_type.as_deref().unwrap_or(&self.name)
    }
}

/// `Connector` definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConnectorDef {
    /// Subgraph the connector belongs to
    #[serde(default)]
    pub subgraph: Option<String>,
}

// ============================================================================
// Connector Schema
// ============================================================================

/// `DataConnectorLink` definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataConnectorLinkDef {
    /// Connector name
    pub name: String,
    /// Schema envelope (`definition.schema`)
    pub schema: LinkSchema,
}

/// Envelope around the connector-reported schema
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkSchema {
    /// The connector-reported schema (`definition.schema.schema`)
    pub schema: ConnectorSchema,
}

/// Schema reported by a data connector
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConnectorSchema {
    /// Native scalar types
    #[serde(default)]
    pub scalar_types: Catalog<ConnectorScalarType>,
    /// Native object types; only names are used
    #[serde(default)]
    pub object_types: Catalog<YamlValue>,
}

/// A connector-native scalar type
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConnectorScalarType {
    /// Comparison operators in connector order; only names are used
    #[serde(default)]
    pub comparison_operators: Catalog<YamlValue>,
    /// Aggregate functions keyed by function name
    #[serde(default)]
    pub aggregate_functions: Catalog<AggregateFunctionDef>,
}

/// A connector aggregate function
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AggregateFunctionDef {
    /// Standard function tag (`min`, `max`, `sum`, `average`, `custom`)
    #[serde(default, rename = "type")]
    pub function_kind: Option<String>,
    /// Declared result type
    #[serde(default)]
    pub result_type: Option<ResultType>,
}

impl AggregateFunctionDef {
    /// Native scalar name of the function's result, if it can be determined.
    ///
    /// `min` and `max` without an explicit result type return the operand type.
    pub fn result_scalar<'a>(&'a self, operand: &'a str) -> Option<&'a str> {
        match &self.result_type {
            Some(result_type) => result_type.named(),
            None => matches!(self.function_kind.as_deref(), Some("min" | "max")).then_some(operand),
        }
    }
}

/// Aggregate function result: a bare scalar name or a full type reference
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResultType {
    Scalar(String),
    Type(ConnectorTypeRef),
}

impl ResultType {
    /// Innermost named type
    pub fn named(&self) -> Option<&str> {
        match self {
            ResultType::Scalar(name) => Some(name),
            ResultType::Type(reference) => reference.named(),
        }
    }
}

/// Connector type reference
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConnectorTypeRef {
    Named { name: String },
    Nullable { underlying_type: Box<ConnectorTypeRef> },
    Array { element_type: Box<ConnectorTypeRef> },
    #[serde(other)]
    Unsupported,
}

impl ConnectorTypeRef {
    /// Innermost named type, looking through nullability; arrays do not resolve
    pub fn named(&self) -> Option<&str> {
        match self {
            ConnectorTypeRef::Named { name } => Some(name),
            ConnectorTypeRef::Nullable { underlying_type } => underlying_type.named(),
            ConnectorTypeRef::Array { .. } | ConnectorTypeRef::Unsupported => None,
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Named entries written either as a mapping (`name: body`) or as a list
/// of names / `{ name, ... }` entries. Order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    entries: Vec<(String, T)>,
    malformed: Vec<YamlValue>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            malformed: Vec::new(),
        }
    }
}

impl<T> Catalog<T> {
    /// Entry names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, body)| (name.as_str(), body))
    }

    /// Look up an entry by exact name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, body)| body)
    }

    /// Whether an entry with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries that had neither a usable name nor a decodable body
    pub fn malformed(&self) -> &[YamlValue] {
        &self.malformed
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: DeserializeOwned + Default> Catalog<T> {
    fn push(&mut self, name: String, body: YamlValue) {
        let decoded = if body.is_null() {
            Ok(T::default())
        } else {
            serde_yaml::from_value(body.clone())
        };
        match decoded {
            Ok(body) => self.entries.push((name, body)),
            Err(_) => self.malformed.push(body),
        }
    }
}

impl<T: DeserializeOwned + Default> FromIterator<(String, YamlValue)> for Catalog<T> {
    fn from_iter<I: IntoIterator<Item = (String, YamlValue)>>(iter: I) -> Self {
        let mut catalog = Catalog::default();
        for (name, body) in iter {
            catalog.push(name, body);
        }
        catalog
    }
}

impl<'de, T: DeserializeOwned + Default> Deserialize<'de> for Catalog<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut catalog = Catalog::default();
        match YamlValue::deserialize(deserializer)? {
            YamlValue::Null => {}
            YamlValue::Mapping(mapping) => {
                for (key, body) in mapping {
                    match key.as_str() {
                        Some(name) => catalog.push(name.to_string(), body),
                        None => catalog.malformed.push(key),
                    }
                }
            }
            YamlValue::Sequence(items) => {
                for item in items {
                    let named = match &item {
                        YamlValue::String(name) => Some((name.clone(), YamlValue::Null)),
                        YamlValue::Mapping(_) => item
                            .get("name")
                            .and_then(YamlValue::as_str)
                            .map(|name| (name.to_string(), item.clone())),
                        _ => None,
                    };
                    match named {
                        Some((name, body)) => catalog.push(name, body),
                        None => catalog.malformed.push(item),
                    }
                }
            }
            other => {
                return Err(de::Error::custom(format!(
                    "expected a mapping or a list, found {other:?}"
                )))
            }
        }
        Ok(catalog)
    }
}

//! Matcher types

use crate::document::ObjectTypeDef;
use crate::types::YamlValue;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Which connector link supplied a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSource {
    /// File holding the `DataConnectorLink`
    pub file: PathBuf,
    /// Connector name
    pub link: String,
}

impl std::fmt::Display for LinkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.link, self.file.display())
    }
}

/// A connector object type as reported in the link schema
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorObjectType {
    /// Native name
    pub name: String,
    /// Reported body, kept opaque
    pub body: YamlValue,
}

/// A local object type paired with the connector type it was matched to
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedType {
    /// Comparison key of the local type name
    pub key: String,
    /// Local definition
    pub object_type: ObjectTypeDef,
    /// Connector-native counterpart
    pub connector_type: ConnectorObjectType,
    /// Provenance
    pub source: LinkSource,
}

/// Matched types keyed by comparison key; iteration is sorted by key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchedTypeTable {
    types: BTreeMap<String, MatchedType>,
}

impl MatchedTypeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the key is taken; returns the existing entry on conflict
    pub fn insert(&mut self, matched: MatchedType) -> Result<(), &MatchedType> {
        use std::collections::btree_map::Entry;
        match self.types.entry(matched.key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(matched);
                Ok(())
            }
            Entry::Occupied(slot) => Err(slot.into_mut()),
        }
    }

    /// Look up by comparison key
    pub fn get(&self, key: &str) -> Option<&MatchedType> {
        self.types.get(key)
    }

    /// Whether a comparison key is matched
    pub fn contains_key(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    /// Matched types in key order
    pub fn iter(&self) -> impl Iterator<Item = &MatchedType> {
        self.types.values()
    }

    /// Number of matched types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<MatchedType> for MatchedTypeTable {
    fn from_iter<I: IntoIterator<Item = MatchedType>>(iter: I) -> Self {
        let mut table = Self::new();
        for matched in iter {
            let _ = table.insert(matched);
        }
        table
    }
}

/// A connector type dropped because an earlier link already supplied its key
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateMatch {
    /// Comparison key
    pub key: String,
    /// Native name that was dropped
    pub connector_type: String,
    /// Link whose match was kept
    pub kept: LinkSource,
    /// Link whose match was dropped
    pub dropped: LinkSource,
}

/// Result of matching connector types against local object types
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Matched types
    pub table: MatchedTypeTable,
    /// Connector object types with no local counterpart
    pub unmatched: Vec<String>,
    /// Later matches dropped in favour of earlier links
    pub duplicates: Vec<DuplicateMatch>,
    /// Local types ignored because another local type has the same key
    pub shadowed: Vec<String>,
}

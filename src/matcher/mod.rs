//! Type matching module
//!
//! Cross-references the object types each connector link reports against
//! locally declared object types.
//!
//! # Matching rules
//!
//! - An object type whose `dataConnectorTypeMapping` names the link and the
//!   native type matches explicitly.
//! - Otherwise the native name and the local name match iff their
//!   comparison keys are equal (`album_tracks` ~ `AlbumTracks`).
//! - Links are visited in file path order, then document order. The first
//!   link to supply a key wins; later ones are reported as duplicates.

mod types;

pub use types::{
    ConnectorObjectType, DuplicateMatch, LinkSource, MatchOutcome, MatchedType, MatchedTypeTable,
};

use crate::classify::Sourced;
use crate::document::{DataConnectorLinkDef, ObjectTypeDef};
use crate::naming::comparison_key;
use std::collections::HashMap;

/// Match connector-reported object types against local object types
pub fn match_object_types(
    object_types: &[Sourced<ObjectTypeDef>],
    links: &[Sourced<DataConnectorLinkDef>],
) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    // comparison key -> local type, first declaration wins
    let mut index: HashMap<String, &ObjectTypeDef> = HashMap::new();
    for object_type in object_types {
        let key = comparison_key(&object_type.item.name);
        if key.is_empty() {
            continue;
        }
        if index.contains_key(&key) {
            tracing::warn!(
                "ObjectType '{}' has the same normalized name as an earlier type, ignoring it",
                object_type.item.name
            );
            outcome.shadowed.push(object_type.item.name.clone());
        } else {
            index.insert(key, &object_type.item);
        }
    }

    let mut ordered: Vec<&Sourced<DataConnectorLinkDef>> = links.iter().collect();
    ordered.sort_by(|a, b| a.source.cmp(&b.source));

    for link in ordered {
        let schema = &link.item.schema.schema;
        for malformed in schema.object_types.malformed() {
            tracing::warn!(
                "Unexpected object type format in {}: {:?}",
                link.source.display(),
                malformed
            );
        }

        for (native, body) in schema.object_types.iter() {
            let local = object_types
                .iter()
                .map(|o| &o.item)
                .find(|o| o.is_mapped_to(&link.item.name, native))
                .or_else(|| index.get(&comparison_key(native)).copied());

            let Some(local) = local else {
                tracing::warn!("No matching ObjectType found for: {}", native);
                outcome.unmatched.push(native.to_string());
                continue;
            };

            let source = LinkSource {
                file: link.source.clone(),
                link: link.item.name.clone(),
            };
            let matched = MatchedType {
                key: comparison_key(&local.name),
                object_type: local.clone(),
                connector_type: ConnectorObjectType {
                    name: native.to_string(),
                    body: body.clone(),
                },
                source: source.clone(),
            };
            let key = matched.key.clone();

            if let Err(kept) = outcome.table.insert(matched) {
                tracing::warn!(
                    "Duplicate match for '{}' from {}, keeping {}",
                    native,
                    source,
                    kept.source
                );
                let kept = kept.source.clone();
                outcome.duplicates.push(DuplicateMatch {
                    key,
                    connector_type: native.to_string(),
                    kept,
                    dropped: source,
                });
            }
        }
    }

    tracing::info!(
        "Matched {} ObjectTypes with DataConnectorLinks",
        outcome.table.len()
    );
    outcome
}

#[cfg(test)]
mod tests;

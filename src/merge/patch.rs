//! In-place patches of `Model` and `GraphqlConfig` documents
//!
//! A patch only ever adds fields that are missing. Values already present
//! are left alone, even when the generator would compute a different one.

use super::types::{ModelPatch, SectionOutcome};
use crate::config::GraphqlAggregateConfig;
use crate::document::{Document, DocumentStream, ModelDef};
use crate::types::{DocumentKind, YamlMapping, YamlValue};
use std::collections::{BTreeMap, HashSet};

/// Point models at the aggregate expression of their object type.
///
/// `expressions` maps object type names to aggregate expression names.
/// Sets `aggregateExpression`, `graphql.filterInputTypeName` and
/// `graphql.aggregate.queryRootField` where absent.
pub fn patch_model_aggregates(
    stream: &mut DocumentStream,
    expressions: &BTreeMap<String, String>,
) -> ModelPatch {
    let mut patch = ModelPatch::default();
    stream.update(|document| {
        let Some(model) = decode_model(document) else {
            return false;
        };
        let Some(expression) = expressions.get(model.object_type_name()) else {
            tracing::warn!("No matching ObjectType found for Model: {}", model.name);
            patch.skipped.push(model.name);
            return false;
        };
        let Some(definition) = document.definition_mut() else {
            return false;
        };

        let mut changed = insert_absent(definition, "aggregateExpression", expression.as_str());
        match graphql_section(definition) {
            Some(graphql) => {
                changed |= insert_absent(
                    graphql,
                    "filterInputTypeName",
                    format!("{}_filter_input", model.name),
                );
                if !graphql.contains_key("aggregate") {
                    let mut aggregate = YamlMapping::new();
                    aggregate.insert(
                        "queryRootField".into(),
                        format!("{}_aggregate", model.name.to_lowercase()).into(),
                    );
                    graphql.insert("aggregate".into(), YamlValue::Mapping(aggregate));
                    changed = true;
                }
            }
            None => tracing::warn!(
                "Model '{}' has a graphql entry that is not a mapping, leaving it alone",
                model.name
            ),
        }

        record(&mut patch, model.name, changed);
        changed
    });

    tracing::info!(
        "Patched {} models, {} already up to date, {} skipped",
        patch.patched.len(),
        patch.unchanged.len(),
        patch.skipped.len()
    );
    patch
}

/// Point models at the boolean expression of their object type.
///
/// `filters` maps object type names to boolean expression names. An
/// existing `filterExpressionType` is only replaced when it names one of
/// the `removed` legacy expressions.
pub fn patch_model_filter(
    stream: &mut DocumentStream,
    filters: &BTreeMap<String, String>,
    removed: &HashSet<String>,
) -> ModelPatch {
    let mut patch = ModelPatch::default();
    stream.update(|document| {
        let Some(model) = decode_model(document) else {
            return false;
        };
        let Some(expression) = model.object_type.as_deref().and_then(|t| filters.get(t)) else {
            tracing::debug!("No BooleanExpressionType for Model '{}'", model.name);
            patch.skipped.push(model.name);
            return false;
        };
        let Some(definition) = document.definition_mut() else {
            return false;
        };

        let replace = match definition.get("filterExpressionType") {
            None | Some(YamlValue::Null) => true,
            Some(current) => current
                .as_str()
                .is_some_and(|name| name != expression.as_str() && removed.contains(name)),
        };
        if replace {
            definition.insert(
                "filterExpressionType".into(),
                expression.as_str().into(),
            );
        }

        record(&mut patch, model.name, replace);
        replace
    });

    tracing::info!(
        "Set filterExpressionType on {} models",
        patch.patched.len()
    );
    patch
}

/// Insert `query.aggregate` into `GraphqlConfig` documents lacking it
pub fn ensure_graphql_aggregate_section(
    stream: &mut DocumentStream,
    config: &GraphqlAggregateConfig,
) -> SectionOutcome {
    let mut section = YamlMapping::new();
    section.insert(
        "filterInputFieldName".into(),
        config.filter_input_field_name.as_str().into(),
    );
    section.insert(
        "countFieldName".into(),
        config.count_field_name.as_str().into(),
    );
    section.insert(
        "countDistinctFieldName".into(),
        config.count_distinct_field_name.as_str().into(),
    );
    let section = YamlValue::Mapping(section);

    let mut found = false;
    let inserted = stream.update(|document| {
        if *document.kind() != DocumentKind::GraphqlConfig {
            return false;
        }
        found = true;
        let Some(definition) = document.definition_mut() else {
            return false;
        };
        let Some(query) = mapping_entry(definition, "query") else {
            tracing::warn!("GraphqlConfig query is not a mapping, leaving it alone");
            return false;
        };
        if query.contains_key("aggregate") {
            return false;
        }
        query.insert("aggregate".into(), section.clone());
        true
    });

    match (found, inserted) {
        (false, _) => {
            tracing::warn!("No GraphqlConfig document found");
            SectionOutcome::NotFound
        }
        (true, 0) => {
            tracing::info!("No updates needed for GraphqlConfig");
            SectionOutcome::Present
        }
        (true, _) => {
            tracing::info!("Added aggregate section to GraphqlConfig");
            SectionOutcome::Inserted
        }
    }
}

fn decode_model(document: &Document) -> Option<ModelDef> {
    if *document.kind() != DocumentKind::Model {
        return None;
    }
    match document.decode::<ModelDef>() {
        Ok(model) => Some(model),
        Err(e) => {
            tracing::debug!("Skipping undecodable Model: {}", e);
            None
        }
    }
}

fn record(patch: &mut ModelPatch, model: String, changed: bool) {
    if changed {
        patch.patched.push(model);
    } else {
        patch.unchanged.push(model);
    }
}

/// Insert `key` unless present; returns whether it was inserted
fn insert_absent(mapping: &mut YamlMapping, key: &str, value: impl Into<YamlValue>) -> bool {
    if mapping.contains_key(key) {
        return false;
    }
    mapping.insert(key.into(), value.into());
    true
}

fn graphql_section(definition: &mut YamlMapping) -> Option<&mut YamlMapping> {
    mapping_entry(definition, "graphql")
}

/// The mapping under `key`, created when missing or null
fn mapping_entry<'a>(mapping: &'a mut YamlMapping, key: &str) -> Option<&'a mut YamlMapping> {
    let entry = mapping
        .entry(key.into())
        .or_insert(YamlValue::Null);
    if entry.is_null() {
        *entry = YamlValue::Mapping(YamlMapping::new());
    }
    entry.as_mapping_mut()
}

//! Boolean expression synthesis

use super::index::{ExpressionIndex, IndexedExpression, NameRegistry, SynthesisReport};
use super::resolve::{resolve_fields, ObjectTarget};
use super::types::{
    BooleanExpressionTypeDef, BooleanOperand, ComparableField, ComparisonOperator, EnableFlag,
    GraphqlTypeName, ObjectBooleanOperand, OperatorMapping, ScalarBooleanOperand,
};
use super::{GeneratedExpression, Synthesis, SynthesisInput};
use crate::document::{Document, ScalarRepresentationDef};
use crate::error::Result;
use crate::naming::{display_name, sanitize_identifier};
use crate::types::DocumentKind;
use std::collections::BTreeMap;

/// Generate scalar and object `BooleanExpressionType` documents
pub fn synthesize_boolean(input: &SynthesisInput<'_>) -> Result<Synthesis> {
    let mut registry = NameRegistry::new();
    let mut report = SynthesisReport::default();

    let (scalars, scalar_index) = scalar_expressions(input, &mut registry, &mut report)?;
    let objects = object_expressions(input, &scalar_index, &mut registry, &mut report)?;

    tracing::info!(
        "Generated {} scalar and {} object BooleanExpressionTypes",
        scalars.len(),
        objects.len()
    );

    Ok(Synthesis {
        scalars,
        objects,
        report,
    })
}

/// One expression per represented native scalar a link reports, in
/// native name order
fn scalar_expressions(
    input: &SynthesisInput<'_>,
    registry: &mut NameRegistry,
    report: &mut SynthesisReport,
) -> Result<(Vec<GeneratedExpression>, ExpressionIndex)> {
    let mut representations: Vec<&ScalarRepresentationDef> = input.representations.iter().collect();
    representations.sort_by(|a, b| {
        (&a.data_connector_scalar_type, &a.data_connector_name)
            .cmp(&(&b.data_connector_scalar_type, &b.data_connector_name))
    });

    let mut generated = Vec::new();
    let mut index = ExpressionIndex::new();

    for representation in representations {
        let native = representation.data_connector_scalar_type.as_str();
        let Some((link, scalar)) =
            input.find_scalar(representation.data_connector_name.as_deref(), native)
        else {
            let reason = match &representation.data_connector_name {
                Some(connector) => format!("not reported by DataConnectorLink '{connector}'"),
                None => "not reported by any DataConnectorLink".to_string(),
            };
            report.skip(native, reason);
            continue;
        };

        let name = format!("{}{}", sanitize_identifier(native), input.config.boolean_suffix);
        let source = format!("{}.{}", link.name, native);
        match registry.claim(&name, &source) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(collision) => {
                report.collision(collision);
                continue;
            }
        }

        let operand_type = sanitize_identifier(&representation.representation);
        let definition = BooleanExpressionTypeDef {
            name: name.clone(),
            operand: BooleanOperand {
                scalar: Some(ScalarBooleanOperand {
                    scalar_type: operand_type.clone(),
                    comparison_operators: scalar
                        .comparison_operators
                        .names()
                        .map(|operator| ComparisonOperator {
                            name: operator.to_string(),
                            argument_type: format!("{operand_type}!"),
                        })
                        .collect(),
                    data_connector_operator_mapping: vec![OperatorMapping {
                        data_connector_name: link.name.clone(),
                        data_connector_scalar_type: native.to_string(),
                        operator_mapping: BTreeMap::new(),
                    }],
                }),
                object: None,
            },
            logical_operators: EnableFlag::ENABLED,
            is_null: EnableFlag::ENABLED,
            graphql: GraphqlTypeName {
                type_name: input.graphql_type_name(&name),
            },
        };

        index.insert(
            IndexedExpression {
                name: name.clone(),
                operand: operand_type.clone(),
            },
            [representation.representation.as_str(), native],
        );
        generated.push(GeneratedExpression {
            name,
            operand: operand_type,
            document: Document::from_definition(
                DocumentKind::BooleanExpressionType,
                &input.config.document_version,
                &definition,
            )?,
        });
    }

    Ok((generated, index))
}

/// One expression per matched object type, in normalized name order
fn object_expressions(
    input: &SynthesisInput<'_>,
    scalars: &ExpressionIndex,
    registry: &mut NameRegistry,
    report: &mut SynthesisReport,
) -> Result<Vec<GeneratedExpression>> {
    let mut names = Vec::new();
    for matched in input.matched.iter() {
        let object_type = &matched.object_type;
        let name = format!(
            "{}{}",
            display_name(&object_type.name),
            input.config.boolean_suffix
        );
        match registry.claim(&name, &object_type.name) {
            Ok(_) => names.push((name, object_type)),
            Err(collision) => report.collision(collision),
        }
    }

    let mut objects = ExpressionIndex::new();
    for (name, object_type) in &names {
        objects.insert(
            IndexedExpression {
                name: name.clone(),
                operand: object_type.name.clone(),
            },
            [object_type.name.as_str()],
        );
    }

    let targets: Vec<ObjectTarget<'_>> = names
        .iter()
        .map(|(name, object_type)| ObjectTarget {
            name: name.as_str(),
            object_type: *object_type,
        })
        .collect();
    let mut resolution = resolve_fields(&targets, scalars, &objects, false);
    report.iterations = resolution.iterations;

    let mut generated = Vec::new();
    for (name, object_type) in names {
        let fields = resolution.fields.remove(&name).unwrap_or_default();
        let definition = BooleanExpressionTypeDef {
            name: name.clone(),
            operand: BooleanOperand {
                scalar: None,
                object: Some(ObjectBooleanOperand {
                    object_type: object_type.name.clone(),
                    comparable_fields: fields
                        .into_iter()
                        .map(|f| ComparableField {
                            field_name: f.field_name,
                            boolean_expression_type: f.expression,
                        })
                        .collect(),
                    comparable_relationships: Vec::new(),
                }),
            },
            logical_operators: EnableFlag::ENABLED,
            is_null: EnableFlag::ENABLED,
            graphql: GraphqlTypeName {
                type_name: input.graphql_type_name(&name),
            },
        };
        generated.push(GeneratedExpression {
            name,
            operand: object_type.name.clone(),
            document: Document::from_definition(
                DocumentKind::BooleanExpressionType,
                &input.config.document_version,
                &definition,
            )?,
        });
    }
    Ok(generated)
}

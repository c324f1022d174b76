//! Aggregate expression synthesis

use super::index::{
    ExpressionIndex, IndexedExpression, NameRegistry, RepresentationTable, SynthesisReport,
};
use super::resolve::{resolve_fields, ObjectTarget};
use super::types::{
    AggregatableField, AggregateExpressionDef, AggregateGraphql, AggregateOperand,
    AggregationFunction, AggregationFunctionMapping, EnableFlag, FunctionName,
    ObjectAggregateOperand, ScalarAggregateOperand,
};
use super::{GeneratedExpression, Synthesis, SynthesisInput};
use crate::document::{ConnectorScalarType, DataConnectorLinkDef, Document};
use crate::error::Result;
use crate::naming::{display_name, sanitize_identifier};
use crate::types::DocumentKind;
use std::collections::BTreeMap;

/// Function enabled through the `count` flags instead of being listed
const COUNT_FUNCTION: &str = "count";

/// Generate scalar and object `AggregateExpression` documents
pub fn synthesize_aggregate(input: &SynthesisInput<'_>) -> Result<Synthesis> {
    let mut registry = NameRegistry::new();
    let mut report = SynthesisReport::default();

    let (scalars, scalar_index) = scalar_expressions(input, &mut registry, &mut report)?;
    let objects = object_expressions(input, &scalar_index, &mut registry, &mut report)?;

    tracing::info!(
        "Generated {} scalar and {} object AggregateExpressions",
        scalars.len(),
        objects.len()
    );

    Ok(Synthesis {
        scalars,
        objects,
        report,
    })
}

// ============================================================================
// Scalars
// ============================================================================

fn scalar_expressions(
    input: &SynthesisInput<'_>,
    registry: &mut NameRegistry,
    report: &mut SynthesisReport,
) -> Result<(Vec<GeneratedExpression>, ExpressionIndex)> {
    let mut generated = Vec::new();
    let mut index = ExpressionIndex::new();

    for link in input.sorted_links() {
        for (native, scalar) in link.schema.schema.scalar_types.iter() {
            if scalar.aggregate_functions.is_empty() {
                report.skip(native, "no aggregate functions");
                continue;
            }
            let Some(representation) = input.representations.lookup(&link.name, native) else {
                report.skip(native, "no representation");
                continue;
            };

            let aggregated_type = sanitize_identifier(representation);
            let name = format!("{}{}", aggregated_type, input.config.aggregate_suffix);
            match registry.claim(&name, &format!("{}.{}", link.name, native)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(collision) => {
                    report.collision(collision);
                    continue;
                }
            }

            let definition = scalar_definition(
                &name,
                &aggregated_type,
                link,
                native,
                scalar,
                input.representations,
            );
            index.insert(
                IndexedExpression {
                    name: name.clone(),
                    operand: aggregated_type.clone(),
                },
                [representation, native],
            );
            generated.push(GeneratedExpression {
                name,
                operand: aggregated_type,
                document: Document::from_definition(
                    DocumentKind::AggregateExpression,
                    &input.config.document_version,
                    &definition,
                )?,
            });
        }
    }

    Ok((generated, index))
}

fn scalar_definition(
    name: &str,
    aggregated_type: &str,
    link: &DataConnectorLinkDef,
    native: &str,
    scalar: &ConnectorScalarType,
    representations: &RepresentationTable,
) -> AggregateExpressionDef {
    let mut functions = Vec::new();
    let mut function_mapping = BTreeMap::new();
    for (function, def) in scalar.aggregate_functions.iter() {
        if function == COUNT_FUNCTION {
            continue;
        }
        let return_type = def
            .result_scalar(native)
            .and_then(|result| resolve_return_type(&link.name, result, representations));
        let Some(return_type) = return_type else {
            tracing::debug!(
                "No return type for aggregate function '{}' of '{}', omitting it",
                function,
                native
            );
            continue;
        };
        functions.push(AggregationFunction {
            name: function.to_string(),
            return_type,
        });
        function_mapping.insert(
            function.to_string(),
            FunctionName {
                name: function.to_string(),
            },
        );
    }

    let counted = scalar.aggregate_functions.contains(COUNT_FUNCTION);
    AggregateExpressionDef {
        name: name.to_string(),
        operand: AggregateOperand {
            scalar: Some(ScalarAggregateOperand {
                aggregated_type: aggregated_type.to_string(),
                aggregation_functions: functions,
                data_connector_aggregation_function_mapping: vec![AggregationFunctionMapping {
                    data_connector_name: link.name.clone(),
                    data_connector_scalar_type: native.to_string(),
                    function_mapping,
                }],
            }),
            object: None,
        },
        graphql: AggregateGraphql {
            select_type_name: format!("{aggregated_type}_aggregate_fields"),
            order_by_input_type_name: Some(format!("{aggregated_type}_aggregate_order_by")),
            aggregate_predicate_input_type_name: Some(format!(
                "{aggregated_type}_array_aggregate_predicate_exp"
            )),
            aggregate_bool_exp_input_type_name: Some(format!(
                "{aggregated_type}_aggregate_bool_exp"
            )),
            aggregate_select_input_type_name: Some(format!("{aggregated_type}_aggregate_select")),
        },
        description: None,
        count: counted.then_some(EnableFlag::ENABLED),
        count_distinct: counted.then_some(EnableFlag::ENABLED),
    }
}

/// Local type returned by a function whose result is the native `result`.
///
/// A result that already names a local representation is taken as is.
fn resolve_return_type(
    connector: &str,
    result: &str,
    representations: &RepresentationTable,
) -> Option<String> {
    representations
        .lookup(connector, result)
        .or_else(|| representations.is_representation(result).then_some(result))
        .map(sanitize_identifier)
}

// ============================================================================
// Objects
// ============================================================================

fn object_expressions(
    input: &SynthesisInput<'_>,
    scalars: &ExpressionIndex,
    registry: &mut NameRegistry,
    report: &mut SynthesisReport,
) -> Result<Vec<GeneratedExpression>> {
    let mut names = Vec::new();
    for matched in input.matched.iter() {
        let object_type = &matched.object_type;
        let base = display_name(&object_type.name);
        let name = format!("{}{}", base, input.config.aggregate_suffix);
        match registry.claim(&name, &object_type.name) {
            Ok(_) => names.push((name, base, object_type)),
            Err(collision) => report.collision(collision),
        }
    }

    let mut objects = ExpressionIndex::new();
    for (name, _, object_type) in &names {
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
        .map(|(name, _, object_type)| ObjectTarget {
            name: name.as_str(),
            object_type: *object_type,
        })
        .collect();
    // An object field is only aggregatable if its type has something to aggregate
    let mut resolution = resolve_fields(&targets, scalars, &objects, true);
    report.iterations = resolution.iterations;

    let mut generated = Vec::new();
    for (name, base, object_type) in names {
        let fields = resolution.fields.remove(&name).unwrap_or_default();
        let definition = AggregateExpressionDef {
            name: name.clone(),
            operand: AggregateOperand {
                scalar: None,
                object: Some(ObjectAggregateOperand {
                    aggregated_type: object_type.name.clone(),
                    aggregatable_fields: fields
                        .into_iter()
                        .map(|f| AggregatableField {
                            field_name: f.field_name,
                            aggregate_expression: f.expression,
                        })
                        .collect(),
                }),
            },
            graphql: AggregateGraphql {
                select_type_name: format!("{base}_aggregate_fields"),
                order_by_input_type_name: None,
                aggregate_predicate_input_type_name: None,
                aggregate_bool_exp_input_type_name: None,
                aggregate_select_input_type_name: None,
            },
            description: Some(format!("Aggregate over {}", object_type.name)),
            count: None,
            count_distinct: None,
        };
        generated.push(GeneratedExpression {
            name,
            operand: object_type.name.clone(),
            document: Document::from_definition(
                DocumentKind::AggregateExpression,
                &input.config.document_version,
                &definition,
            )?,
        });
    }
    Ok(generated)
}

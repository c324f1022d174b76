//! Generated document definitions
//!
//! Serialized field order is the order documents are written in. Operands
//! are structs with one populated member rather than enums, since
//! serde_yaml writes enum variants as YAML tags.

use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// Shared
// ============================================================================

/// `{ enable: bool }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnableFlag {
    pub enable: bool,
}

impl EnableFlag {
    /// `{ enable: true }`
    pub const ENABLED: EnableFlag = EnableFlag { enable: true };
}

/// `graphql: { typeName }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlTypeName {
    pub type_name: String,
}

// ============================================================================
// BooleanExpressionType
// ============================================================================

/// `BooleanExpressionType` definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanExpressionTypeDef {
    pub name: String,
    pub operand: BooleanOperand,
    pub logical_operators: EnableFlag,
    pub is_null: EnableFlag,
    pub graphql: GraphqlTypeName,
}

/// Operand of a boolean expression; exactly one member is set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanOperand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar: Option<ScalarBooleanOperand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectBooleanOperand>,
}

/// Comparison operators over a scalar type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarBooleanOperand {
    #[serde(rename = "type")]
    pub scalar_type: String,
    pub comparison_operators: Vec<ComparisonOperator>,
    pub data_connector_operator_mapping: Vec<OperatorMapping>,
}

/// A comparison operator and its argument type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOperator {
    pub name: String,
    pub argument_type: String,
}

/// Connector operator mapping for a scalar boolean expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorMapping {
    pub data_connector_name: String,
    pub data_connector_scalar_type: String,
    pub operator_mapping: BTreeMap<String, String>,
}

/// Comparable fields of an object type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectBooleanOperand {
    #[serde(rename = "type")]
    pub object_type: String,
    pub comparable_fields: Vec<ComparableField>,
    pub comparable_relationships: Vec<String>,
}

/// A field usable in a filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableField {
    pub field_name: String,
    pub boolean_expression_type: String,
}

// ============================================================================
// AggregateExpression
// ============================================================================

/// `AggregateExpression` definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateExpressionDef {
    pub name: String,
    pub operand: AggregateOperand,
    pub graphql: AggregateGraphql,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<EnableFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_distinct: Option<EnableFlag>,
}

/// Operand of an aggregate expression; exactly one member is set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateOperand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar: Option<ScalarAggregateOperand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectAggregateOperand>,
}

/// Aggregation functions over a scalar type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarAggregateOperand {
    pub aggregated_type: String,
    pub aggregation_functions: Vec<AggregationFunction>,
    pub data_connector_aggregation_function_mapping: Vec<AggregationFunctionMapping>,
}

/// An aggregation function and its return type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationFunction {
    pub name: String,
    pub return_type: String,
}

/// Connector function mapping for a scalar aggregate expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationFunctionMapping {
    pub data_connector_name: String,
    pub data_connector_scalar_type: String,
    pub function_mapping: BTreeMap<String, FunctionName>,
}

/// `{ name }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionName {
    pub name: String,
}

/// Aggregatable fields of an object type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAggregateOperand {
    pub aggregated_type: String,
    pub aggregatable_fields: Vec<AggregatableField>,
}

/// A field usable in an aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatableField {
    pub field_name: String,
    pub aggregate_expression: String,
}

/// GraphQL names of an aggregate expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateGraphql {
    pub select_type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_input_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_predicate_input_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_bool_exp_input_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_select_input_type_name: Option<String>,
}

// ============================================================================
// Scalar Declarations
// ============================================================================

/// Generated `ScalarType` definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarTypeOut {
    pub name: String,
    pub graphql: GraphqlTypeName,
}

/// Generated `DataConnectorScalarRepresentation` definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarRepresentationOut {
    pub data_connector_name: String,
    pub data_connector_scalar_type: String,
    pub representation: String,
    pub graphql: ComparisonExpressionName,
}

/// `graphql: { comparisonExpressionTypeName }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonExpressionName {
    pub comparison_expression_type_name: String,
}

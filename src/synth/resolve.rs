//! Object field resolution
//!
//! An object expression lists the fields whose type resolves to a scalar
//! expression or to another object's expression. Object expressions may
//! reference each other in any order, including cycles, so field lists are
//! computed by iterating from empty lists until nothing changes. Each
//! iteration reads only the previous iteration's lists.
//!
//! When object references require the referenced expression to be
//! non-empty, a reference can only become viable over time, never stop
//! being viable, so the lists only grow and the loop reaches the least
//! fixed point within `objects + 1` iterations.

use super::index::ExpressionIndex;
use crate::document::ObjectTypeDef;
use crate::naming::is_array_type;
use std::collections::{BTreeMap, HashSet};

/// A field and the expression it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Field name
    pub field_name: String,
    /// Name of the referenced expression
    pub expression: String,
}

/// An object type an expression is generated for
#[derive(Debug, Clone, Copy)]
pub struct ObjectTarget<'a> {
    /// Generated expression name
    pub name: &'a str,
    /// Local object type
    pub object_type: &'a ObjectTypeDef,
}

/// Settled field lists, keyed by generated expression name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Field list of every target
    pub fields: BTreeMap<String, Vec<ResolvedField>>,
    /// Iterations run, including the one that confirmed the result
    pub iterations: usize,
    /// Whether the lists stopped changing before the cap
    pub converged: bool,
}

/// Resolve the field lists of every target.
///
/// `scalars` binds scalar types and `objects` binds object types to their
/// expressions. With `require_populated`, an object reference only counts
/// once the referenced expression has at least one field.
pub fn resolve_fields(
    targets: &[ObjectTarget<'_>],
    scalars: &ExpressionIndex,
    objects: &ExpressionIndex,
    require_populated: bool,
) -> Resolution {
    let mut current: BTreeMap<String, Vec<ResolvedField>> = targets
        .iter()
        .map(|t| (t.name.to_string(), Vec::new()))
        .collect();

    let cap = targets.len() + 1;
    for iteration in 1..=cap {
        let next: BTreeMap<String, Vec<ResolvedField>> = targets
            .iter()
            .map(|target| {
                let fields = resolve_object(target.object_type, scalars, objects, |name| {
                    !require_populated || current.get(name).is_some_and(|f| !f.is_empty())
                });
                (target.name.to_string(), fields)
            })
            .collect();

        if next == current {
            tracing::debug!("Object field resolution settled after {} iterations", iteration);
            return Resolution {
                fields: next,
                iterations: iteration,
                converged: true,
            };
        }
        current = next;
    }

    tracing::warn!(
        "Object field resolution did not settle after {} iterations",
        cap
    );
    Resolution {
        fields: current,
        iterations: cap,
        converged: false,
    }
}

/// Fields of one object type that resolve, in declaration order
fn resolve_object(
    object_type: &ObjectTypeDef,
    scalars: &ExpressionIndex,
    objects: &ExpressionIndex,
    viable: impl Fn(&str) -> bool,
) -> Vec<ResolvedField> {
    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    for field in &object_type.fields {
        let field_type = field.field_type.as_str();
        if is_array_type(field_type) || seen.contains(field.name.as_str()) {
            continue;
        }

        let expression = scalars
            .resolve(field_type)
            .or_else(|| objects.resolve(field_type).filter(|e| viable(&e.name)));

        if let Some(expression) = expression {
            seen.insert(field.name.as_str());
            fields.push(ResolvedField {
                field_name: field.name.clone(),
                expression: expression.name.clone(),
            });
        }
    }
    fields
}

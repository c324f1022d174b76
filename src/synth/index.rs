//! Lookup tables shared by the synthesis stages
//!
//! Each stage receives the tables produced by earlier stages as immutable
//! snapshots and returns new ones; nothing is mutated across stages.

use crate::classify::Sourced;
use crate::document::ScalarRepresentationDef;
use crate::naming::comparison_key;
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// Representation Table
// ============================================================================

/// Native scalar -> local representation, as declared by
/// `DataConnectorScalarRepresentation` documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepresentationTable {
    entries: Vec<ScalarRepresentationDef>,
}

impl RepresentationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from classified representations, in declaration order
    pub fn from_sourced(representations: &[Sourced<ScalarRepresentationDef>]) -> Self {
        representations.iter().map(|r| r.item.clone()).collect()
    }

    /// Add a representation; earlier entries keep precedence
    pub fn push(&mut self, representation: ScalarRepresentationDef) {
        self.entries.push(representation);
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ScalarRepresentationDef> {
        self.entries.iter()
    }

    /// Representation of `native` on `connector`.
    ///
    /// An entry naming the connector wins over one that names none; the
    /// first declaration wins among equals.
    pub fn lookup(&self, connector: &str, native: &str) -> Option<&str> {
        let candidates = || {
            self.entries
                .iter()
                .filter(move |e| e.data_connector_scalar_type == native)
        };
        candidates()
            .find(|e| e.data_connector_name.as_deref() == Some(connector))
            .or_else(|| candidates().find(|e| e.data_connector_name.is_none()))
            .map(|e| e.representation.as_str())
    }

    /// Whether `native` is represented on `connector`
    pub fn represents(&self, connector: &str, native: &str) -> bool {
        self.lookup(connector, native).is_some()
    }

    /// Whether `name` is the target of some representation
    pub fn is_representation(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.representation == name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ScalarRepresentationDef> for RepresentationTable {
    fn from_iter<I: IntoIterator<Item = ScalarRepresentationDef>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Expression Index
// ============================================================================

/// A generated expression as seen by later stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedExpression {
    /// Generated document name
    pub name: String,
    /// Type the expression operates on
    pub operand: String,
}

/// Generated expressions (arena) indexed by normalized type name
#[derive(Debug, Clone, Default)]
pub struct ExpressionIndex {
    arena: Vec<IndexedExpression>,
    by_key: HashMap<String, usize>,
}

impl ExpressionIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expression reachable under each of `aliases`.
    ///
    /// Aliases already bound to an earlier expression are left alone and
    /// empty keys are never bound. Returns the arena slot.
    pub fn insert<'a>(
        &mut self,
        expression: IndexedExpression,
        aliases: impl IntoIterator<Item = &'a str>,
    ) -> usize {
        let slot = self.arena.len();
        self.arena.push(expression);
        for alias in aliases {
            let key = comparison_key(alias);
            if !key.is_empty() {
                self.by_key.entry(key).or_insert(slot);
            }
        }
        slot
    }

    /// Expression bound to the normalized form of `type_name`
    pub fn resolve(&self, type_name: &str) -> Option<&IndexedExpression> {
        self.by_key
            .get(&comparison_key(type_name))
            .map(|&slot| &self.arena[slot])
    }

    /// Expression in an arena slot
    pub fn get(&self, slot: usize) -> Option<&IndexedExpression> {
        self.arena.get(slot)
    }

    /// Expressions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &IndexedExpression> {
        self.arena.iter()
    }

    /// Number of expressions
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether no expression was indexed
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

// ============================================================================
// Name Registry
// ============================================================================

/// Claims generated names so every name comes from exactly one source
#[derive(Debug, Default)]
pub struct NameRegistry {
    claimed: HashMap<String, String>,
}

impl NameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name` for `source`; the first claimant keeps it.
    ///
    /// `Ok(false)` means `source` already holds the name.
    pub fn claim(&mut self, name: &str, source: &str) -> std::result::Result<bool, NameCollision> {
        match self.claimed.get(name) {
            Some(kept) if kept != source => Err(NameCollision {
                name: name.to_string(),
                kept: kept.clone(),
                dropped: source.to_string(),
            }),
            Some(_) => Ok(false),
            None => {
                self.claimed.insert(name.to_string(), source.to_string());
                Ok(true)
            }
        }
    }

    /// Whether `name` has been claimed
    pub fn is_claimed(&self, name: &str) -> bool {
        self.claimed.contains_key(name)
    }
}

// ============================================================================
// Report
// ============================================================================

/// Two sources mapped to the same generated name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCollision {
    /// Generated name
    pub name: String,
    /// Source whose expression was kept
    pub kept: String,
    /// Source whose expression was dropped
    pub dropped: String,
}

/// A connector scalar no expression was generated for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedScalar {
    /// Native scalar name
    pub scalar: String,
    /// Why it was skipped
    pub reason: String,
}

/// Diagnostics collected while synthesizing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SynthesisReport {
    /// Name collisions, in detection order
    pub collisions: Vec<NameCollision>,
    /// Scalars without a generated expression
    pub skipped_scalars: Vec<SkippedScalar>,
    /// Iterations the object field resolution needed to settle
    pub iterations: usize,
}

impl SynthesisReport {
    /// Record and log a name collision
    pub fn collision(&mut self, collision: NameCollision) {
        tracing::warn!(
            "Generated name '{}' from '{}' collides with '{}', keeping the first",
            collision.name,
            collision.dropped,
            collision.kept
        );
        self.collisions.push(collision);
    }

    /// Record a skipped scalar
    pub fn skip(&mut self, scalar: &str, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::debug!("Skipping scalar '{}': {}", scalar, reason);
        self.skipped_scalars.push(SkippedScalar {
            scalar: scalar.to_string(),
            reason,
        });
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: SynthesisReport) {
        self.collisions.extend(other.collisions);
        self.skipped_scalars.extend(other.skipped_scalars);
        self.iterations = self.iterations.max(other.iterations);
    }
}

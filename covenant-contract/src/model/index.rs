//! Index specifications for the contract model.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A named, ordered set of field keys with a uniqueness flag.
///
/// Index identity is the declared name: renaming an index, even with identical
/// columns, reads as remove-then-add during diffing. Column order matters for
/// composite indexes and compares order-sensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Index name, unique per table.
    pub name: SmolStr,
    /// Participating field keys, in column order.
    pub fields: Vec<SmolStr>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
}

impl IndexSpec {
    /// Create a non-unique index.
    pub fn new(name: impl Into<SmolStr>, fields: Vec<SmolStr>) -> Self {
        Self {
            name: name.into(),
            fields,
            unique: false,
        }
    }

    /// Make the index unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Get the index name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the definition (columns or uniqueness) differs from another
    /// index carrying the same name.
    pub fn definition_differs(&self, other: &IndexSpec) -> bool {
        self.fields != other.fields || self.unique != other.unique
    }
}

//! Column and index diffing between two contract snapshots.
//!
//! Diffing is pure: identical snapshots (structurally, not by reference)
//! always produce empty change sets. Columns are matched by name and indexes
//! strictly by declared name, so renaming an index reads as remove-then-add
//! even when its definition is unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::expand::{ColumnDef, IndexDef};

/// What changed about a column matched in both snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeDetail {
    /// Storage column type changed.
    StorageType,
    /// Nullability changed.
    Nullability,
    /// Declared default changed. Presence is compared explicitly: moving
    /// from no default to `0`, `false`, or `''` is a change.
    Default,
    /// Unique constraint changed.
    Uniqueness,
    /// Foreign-key reference changed.
    ForeignKey,
    /// Validation rule list changed (order-sensitive).
    Validations,
}

/// A column present in both snapshots with a differing definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnChange {
    /// Column name.
    pub name: SmolStr,
    /// Definition in the old snapshot.
    pub old: ColumnDef,
    /// Definition in the new snapshot.
    pub new: ColumnDef,
    /// Which properties differ.
    pub details: Vec<ChangeDetail>,
}

/// Result of diffing two column lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldChanges {
    /// Columns present only in the new snapshot, in new-snapshot order.
    pub added: Vec<ColumnDef>,
    /// Columns present only in the old snapshot, in old-snapshot order.
    pub removed: Vec<ColumnDef>,
    /// Columns present in both with differing definitions.
    pub changed: Vec<ColumnChange>,
}

impl FieldChanges {
    /// Check if there are any differences.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// An index present in both snapshots with a differing definition.
///
/// Changed indexes cannot be altered in place; they are emitted downstream as
/// drop-then-create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexChange {
    /// Definition in the old snapshot.
    pub old: IndexDef,
    /// Definition in the new snapshot.
    pub new: IndexDef,
}

/// Result of diffing two index lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexChanges {
    /// Indexes present only in the new snapshot.
    pub added: Vec<IndexDef>,
    /// Indexes present only in the old snapshot.
    pub removed: Vec<IndexDef>,
    /// Indexes present in both whose field sequence or uniqueness differs.
    pub changed: Vec<IndexChange>,
}

impl IndexChanges {
    /// Check if there are any differences.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Diff two resolved column lists, matched by column name.
pub fn diff_fields(old: &[ColumnDef], new: &[ColumnDef]) -> FieldChanges {
    let old_by_name: HashMap<&str, &ColumnDef> =
        old.iter().map(|c| (c.name.as_str(), c)).collect();
    let new_by_name: HashMap<&str, &ColumnDef> =
        new.iter().map(|c| (c.name.as_str(), c)).collect();

    let mut changes = FieldChanges::default();

    for column in new {
        match old_by_name.get(column.name.as_str()) {
            None => changes.added.push(column.clone()),
            Some(old_column) => {
                let details = column_change_details(old_column, column);
                if !details.is_empty() {
                    changes.changed.push(ColumnChange {
                        name: column.name.clone(),
                        old: (*old_column).clone(),
                        new: column.clone(),
                        details,
                    });
                }
            }
        }
    }

    for column in old {
        if !new_by_name.contains_key(column.name.as_str()) {
            changes.removed.push(column.clone());
        }
    }

    changes
}

/// Classify which properties differ between two definitions of one column.
fn column_change_details(old: &ColumnDef, new: &ColumnDef) -> Vec<ChangeDetail> {
    let mut details = Vec::new();

    if old.storage_type != new.storage_type {
        details.push(ChangeDetail::StorageType);
    }
    if old.nullable != new.nullable {
        details.push(ChangeDetail::Nullability);
    }
    // Option equality: None vs Some(0/false/"") is a real change.
    if old.default != new.default {
        details.push(ChangeDetail::Default);
    }
    if old.unique != new.unique {
        details.push(ChangeDetail::Uniqueness);
    }
    if old.foreign_key != new.foreign_key {
        details.push(ChangeDetail::ForeignKey);
    }
    if old.validations != new.validations {
        details.push(ChangeDetail::Validations);
    }

    details
}

/// Diff two resolved index lists, matched strictly by index name.
pub fn diff_indexes(old: &[IndexDef], new: &[IndexDef]) -> IndexChanges {
    let old_by_name: HashMap<&str, &IndexDef> =
        old.iter().map(|i| (i.name.as_str(), i)).collect();
    let new_by_name: HashMap<&str, &IndexDef> =
        new.iter().map(|i| (i.name.as_str(), i)).collect();

    let mut changes = IndexChanges::default();

    for index in new {
        match old_by_name.get(index.name.as_str()) {
            None => changes.added.push(index.clone()),
            Some(old_index) => {
                if old_index.definition_differs(index) {
                    changes.changed.push(IndexChange {
                        old: (*old_index).clone(),
                        new: index.clone(),
                    });
                }
            }
        }
    }

    for index in old {
        if !new_by_name.contains_key(index.name.as_str()) {
            changes.removed.push(index.clone());
        }
    }

    changes
}

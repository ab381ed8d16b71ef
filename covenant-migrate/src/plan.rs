//! Migration synthesis.
//!
//! [`synthesize`] is the state machine at the heart of the engine: given an
//! optional old and optional new contract snapshot for the same entity, it
//! returns `None` when nothing changed or an ordered [`MigrationPlan`]
//! otherwise. The plan is a list of DDL-equivalent operations, with text
//! rendering kept as a separate stage so the operations stay testable.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use covenant_contract::{Contract, resolve_table_name};

use crate::diff::{diff_fields, diff_indexes};
use crate::error::MigrateResult;
use crate::expand::{ColumnDef, IndexDef, effective_columns, effective_indexes, entity_label};

/// Full construction description of one table: resolved columns and indexes.
///
/// Used both by create plans and as the embedded recreate description of drop
/// plans, so the two stay symmetric by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Physical table name.
    pub table: SmolStr,
    /// Full resolved column list, in emission order.
    pub columns: Vec<ColumnDef>,
    /// Full effective index list.
    pub indexes: Vec<IndexDef>,
}

impl TableSpec {
    /// Resolve a contract into its full table description.
    pub fn from_contract(contract: &Contract) -> MigrateResult<Self> {
        let table: SmolStr = resolve_table_name(contract)?.into();
        let columns = effective_columns(contract);
        let indexes = effective_indexes(contract, &table);
        Ok(Self {
            table,
            columns,
            indexes,
        })
    }
}

/// A single migration operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Create a table with its full column and index list.
    CreateTable(TableSpec),
    /// Drop a table. Carries the full recreate description so the artifact
    /// restates the dropped structure even though automatic reversal is not
    /// guaranteed to run.
    DropTable {
        /// Table to drop.
        table: SmolStr,
        /// Full description of the dropped structure.
        recreate: TableSpec,
    },
    /// Add a column.
    AddColumn {
        /// Target table.
        table: SmolStr,
        /// New column definition.
        column: ColumnDef,
    },
    /// Drop a column. Carries the old definition for best-effort reversal.
    DropColumn {
        /// Target table.
        table: SmolStr,
        /// Dropped column definition.
        column: ColumnDef,
    },
    /// Change a column in place to a new definition.
    ChangeColumn {
        /// Target table.
        table: SmolStr,
        /// Previous definition.
        old: ColumnDef,
        /// Destination definition.
        new: ColumnDef,
    },
    /// Create an index.
    CreateIndex(IndexDef),
    /// Drop an index.
    DropIndex(IndexDef),
}

/// An ordered migration program for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationPlan {
    /// Entity label used in the artifact name.
    pub entity: SmolStr,
    /// Physical table name.
    pub table: SmolStr,
    /// Operations in execution order.
    pub operations: Vec<Operation>,
}

impl MigrationPlan {
    /// Get a human-readable summary of the plan.
    pub fn summary(&self) -> String {
        let mut creates = 0usize;
        let mut drops = 0usize;
        let mut adds = 0usize;
        let mut removals = 0usize;
        let mut changes = 0usize;
        let mut index_creates = 0usize;
        let mut index_drops = 0usize;

        for op in &self.operations {
            match op {
                Operation::CreateTable(_) => creates += 1,
                Operation::DropTable { .. } => drops += 1,
                Operation::AddColumn { .. } => adds += 1,
                Operation::DropColumn { .. } => removals += 1,
                Operation::ChangeColumn { .. } => changes += 1,
                Operation::CreateIndex(_) => index_creates += 1,
                Operation::DropIndex(_) => index_drops += 1,
            }
        }

        let mut parts = Vec::new();
        if creates > 0 {
            parts.push(format!("create {creates} table(s)"));
        }
        if drops > 0 {
            parts.push(format!("drop {drops} table(s)"));
        }
        if adds > 0 {
            parts.push(format!("add {adds} column(s)"));
        }
        if removals > 0 {
            parts.push(format!("drop {removals} column(s)"));
        }
        if changes > 0 {
            parts.push(format!("change {changes} column(s)"));
        }
        if index_creates > 0 {
            parts.push(format!("create {index_creates} index(es)"));
        }
        if index_drops > 0 {
            parts.push(format!("drop {index_drops} index(es)"));
        }

        if parts.is_empty() {
            "no changes".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Synthesize a migration plan from two optional contract snapshots.
///
/// Returns `Ok(None)` when no migration is needed: both sides absent, a
/// module contract on either side, or an alter with empty diffs. The caller
/// must not persist anything for a `None` result.
pub fn synthesize(
    old: Option<&Contract>,
    new: Option<&Contract>,
) -> MigrateResult<Option<MigrationPlan>> {
    // Module contracts have no physical table and never migrate.
    if old.is_some_and(Contract::is_module) || new.is_some_and(Contract::is_module) {
        return Ok(None);
    }

    match (old, new) {
        (None, None) => Ok(None),
        (None, Some(contract)) => synthesize_create(contract).map(Some),
        (Some(contract), None) => synthesize_drop(contract).map(Some),
        (Some(old), Some(new)) => synthesize_alter(old, new),
    }
}

/// Create plan: one create-table operation carrying the full table spec.
fn synthesize_create(contract: &Contract) -> MigrateResult<MigrationPlan> {
    let spec = TableSpec::from_contract(contract)?;
    Ok(MigrationPlan {
        entity: entity_label(contract),
        table: spec.table.clone(),
        operations: vec![Operation::CreateTable(spec)],
    })
}

/// Drop plan: one drop-table operation embedding the full recreate spec.
fn synthesize_drop(contract: &Contract) -> MigrateResult<MigrationPlan> {
    let spec = TableSpec::from_contract(contract)?;
    Ok(MigrationPlan {
        entity: entity_label(contract),
        table: spec.table.clone(),
        operations: vec![Operation::DropTable {
            table: spec.table.clone(),
            recreate: spec,
        }],
    })
}

/// Alter plan: diff both snapshots and assemble operations in fixed order.
///
/// Column drops come before adds before changes, and index drops (removed and
/// changed) come before index creates (added and changed recreations), so a
/// rename expressed as remove+add in one contract edit never collides with
/// itself.
fn synthesize_alter(old: &Contract, new: &Contract) -> MigrateResult<Option<MigrationPlan>> {
    let old_spec = TableSpec::from_contract(old)?;
    let new_spec = TableSpec::from_contract(new)?;

    let field_changes = diff_fields(&old_spec.columns, &new_spec.columns);
    let index_changes = diff_indexes(&old_spec.indexes, &new_spec.indexes);

    if field_changes.is_empty() && index_changes.is_empty() {
        return Ok(None);
    }

    let table = new_spec.table.clone();
    let mut operations = Vec::new();

    for column in field_changes.removed {
        operations.push(Operation::DropColumn {
            table: table.clone(),
            column,
        });
    }
    for column in field_changes.added {
        operations.push(Operation::AddColumn {
            table: table.clone(),
            column,
        });
    }
    for change in field_changes.changed {
        operations.push(Operation::ChangeColumn {
            table: table.clone(),
            old: change.old,
            new: change.new,
        });
    }

    for index in index_changes.removed {
        operations.push(Operation::DropIndex(index));
    }
    for change in &index_changes.changed {
        operations.push(Operation::DropIndex(change.old.clone()));
    }
    for index in index_changes.added {
        operations.push(Operation::CreateIndex(index));
    }
    for change in index_changes.changed {
        operations.push(Operation::CreateIndex(change.new));
    }

    Ok(Some(MigrationPlan {
        entity: entity_label(new),
        table,
        operations,
    }))
}

//! Effective schema expansion.
//!
//! Turns a contract snapshot into its physical shape: the full column list
//! (including columns synthesized from storage options) and the full effective
//! index list (declared indexes plus indexes implied by per-field flags and
//! soft delete). Both differs operate on the expanded shape, so option toggles
//! diff exactly like hand-declared fields.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use covenant_contract::{
    AbstractType, Contract, DefaultValue, Field, ForeignKey, Validation, storage_type,
};

/// A resolved physical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: SmolStr,
    /// Storage column type.
    pub storage_type: SmolStr,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column carries a unique constraint.
    pub unique: bool,
    /// Whether the column is part of the primary key.
    pub primary_key: bool,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
    /// Declared default value, if any.
    pub default: Option<DefaultValue>,
    /// Foreign-key reference, if any.
    pub foreign_key: Option<ForeignKey>,
    /// Validation rules affecting the effective column shape.
    pub validations: Vec<Validation>,
}

impl ColumnDef {
    /// Resolve a declared field into its physical column.
    pub fn from_field(field: &Field) -> Self {
        Self {
            name: field.key.clone(),
            storage_type: storage_type(&field.abstract_type, field.repeated).into(),
            nullable: field.nullable,
            unique: field.unique,
            primary_key: field.primary_key,
            auto_increment: false,
            default: field.default.clone(),
            foreign_key: field.foreign_key.clone(),
            validations: field.validations.clone(),
        }
    }

    fn synthesized(name: &str, ty: &AbstractType) -> Self {
        Self {
            name: name.into(),
            storage_type: storage_type(ty, false).into(),
            nullable: false,
            unique: false,
            primary_key: false,
            auto_increment: false,
            default: None,
            foreign_key: None,
            validations: Vec::new(),
        }
    }
}

/// A resolved physical index bound to a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDef {
    /// Index name, unique per table.
    pub name: SmolStr,
    /// Target table.
    pub table: SmolStr,
    /// Participating columns, order preserved.
    pub columns: Vec<SmolStr>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
}

impl IndexDef {
    /// Create a non-unique index.
    pub fn new(name: impl Into<SmolStr>, table: impl Into<SmolStr>, columns: Vec<SmolStr>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            columns,
            unique: false,
        }
    }

    /// Make the index unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Whether the definition (columns or uniqueness) differs from another
    /// index carrying the same name.
    pub fn definition_differs(&self, other: &IndexDef) -> bool {
        self.columns != other.columns || self.unique != other.unique
    }
}

/// Resolve the full physical column list for a contract.
///
/// Declared fields come first in declaration order. When no field is flagged
/// as the primary key, a `bigint` auto-increment `id` column is synthesized
/// ahead of them, so an entity with zero fields still yields a valid table.
/// Option-driven columns (timestamps, audit users, soft delete) follow.
pub fn effective_columns(contract: &Contract) -> Vec<ColumnDef> {
    let mut columns = Vec::with_capacity(contract.fields.len() + 5);

    if contract.primary_key_fields().is_empty() {
        let mut id = ColumnDef::synthesized("id", &AbstractType::Int64);
        id.primary_key = true;
        id.auto_increment = true;
        columns.push(id);
    }

    columns.extend(contract.fields.values().map(ColumnDef::from_field));

    if contract.options.timestamps {
        let mut created_at = ColumnDef::synthesized("created_at", &AbstractType::Timestamp);
        created_at.default = Some(DefaultValue::Expression("now()".into()));
        columns.push(created_at);

        let mut updated_at = ColumnDef::synthesized("updated_at", &AbstractType::Timestamp);
        updated_at.default = Some(DefaultValue::Expression("now()".into()));
        columns.push(updated_at);
    }

    if contract.options.audit_user {
        let mut created_by = ColumnDef::synthesized("created_by", &AbstractType::String);
        created_by.nullable = true;
        columns.push(created_by);

        let mut updated_by = ColumnDef::synthesized("updated_by", &AbstractType::String);
        updated_by.nullable = true;
        columns.push(updated_by);
    }

    if contract.options.soft_delete {
        let mut deleted = ColumnDef::synthesized("deleted", &AbstractType::Boolean);
        deleted.default = Some(DefaultValue::Bool(false));
        columns.push(deleted);
    }

    columns
}

/// Resolve the full effective index list for a contract.
///
/// Declared indexes come first, then single-column indexes implied by
/// per-field `unique`/`indexed` flags, then the implicit soft-delete index.
/// Implicit names are deterministic so they diff stably across snapshots.
pub fn effective_indexes(contract: &Contract, table: &str) -> Vec<IndexDef> {
    let mut indexes: Vec<IndexDef> = contract
        .indexes
        .iter()
        .map(|spec| IndexDef {
            name: spec.name.clone(),
            table: table.into(),
            columns: spec.fields.clone(),
            unique: spec.unique,
        })
        .collect();

    for field in contract.fields.values() {
        if field.unique {
            indexes.push(
                IndexDef::new(
                    format!("uq_{}_{}", table, field.key),
                    table,
                    vec![field.key.clone()],
                )
                .unique(),
            );
        } else if field.indexed {
            indexes.push(IndexDef::new(
                format!("idx_{}_{}", table, field.key),
                table,
                vec![field.key.clone()],
            ));
        }
    }

    if contract.options.soft_delete {
        indexes.push(IndexDef::new(
            format!("idx_{}_deleted", table),
            table,
            vec!["deleted".into()],
        ));
    }

    indexes
}

/// Human-readable entity label used in artifact names.
///
/// The entity name wins when present; otherwise the contract name with a
/// trailing `Contract` suffix stripped.
pub fn entity_label(contract: &Contract) -> SmolStr {
    if let Some(entity_name) = &contract.entity_name
        && !entity_name.is_empty()
    {
        return entity_name.clone();
    }

    let name = contract.name();
    name.strip_suffix("Contract").unwrap_or(name).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_contract::{ContractOptions, IndexSpec};

    #[test]
    fn test_zero_field_contract_gets_primary_key() {
        let columns = effective_columns(&Contract::new("EmptyContract"));
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name.as_str(), "id");
        assert!(columns[0].primary_key);
        assert!(columns[0].auto_increment);
        assert_eq!(columns[0].storage_type.as_str(), "bigint");
    }

    #[test]
    fn test_declared_primary_key_suppresses_synthesis() {
        let contract = Contract::new("UserContract")
            .with_field(Field::new("uuid", AbstractType::Uuid).primary_key());
        let columns = effective_columns(&contract);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name.as_str(), "uuid");
    }

    #[test]
    fn test_option_columns() {
        let contract = Contract::new("UserContract").with_options(ContractOptions {
            timestamps: true,
            audit_user: true,
            soft_delete: true,
            ..Default::default()
        });

        let columns = effective_columns(&contract);
        let names: Vec<&str> = columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["id", "created_at", "updated_at", "created_by", "updated_by", "deleted"]
        );
    }

    #[test]
    fn test_soft_delete_default_is_false() {
        let contract = Contract::new("UserContract").with_options(ContractOptions {
            soft_delete: true,
            ..Default::default()
        });
        let columns = effective_columns(&contract);
        let deleted = columns.iter().find(|c| c.name == "deleted").unwrap();
        assert_eq!(deleted.default, Some(DefaultValue::Bool(false)));
    }

    #[test]
    fn test_implicit_unique_index() {
        let contract = Contract::new("UserContract")
            .with_field(Field::new("email", AbstractType::String).unique());
        let indexes = effective_indexes(&contract, "users");

        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].name.as_str(), "uq_users_email");
        assert!(indexes[0].unique);
        assert_eq!(indexes[0].columns, vec![SmolStr::from("email")]);
    }

    #[test]
    fn test_implicit_soft_delete_index() {
        let contract = Contract::new("UserContract").with_options(ContractOptions {
            soft_delete: true,
            ..Default::default()
        });
        let indexes = effective_indexes(&contract, "users");
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].name.as_str(), "idx_users_deleted");
    }

    #[test]
    fn test_declared_indexes_come_first() {
        let contract = Contract::new("OrderContract")
            .with_field(Field::new("status", AbstractType::String).indexed())
            .with_index(
                IndexSpec::new("uq_orders_no_line", vec!["no".into(), "line".into()]).unique(),
            );

        let indexes = effective_indexes(&contract, "orders");
        assert_eq!(indexes[0].name.as_str(), "uq_orders_no_line");
        assert_eq!(indexes[1].name.as_str(), "idx_orders_status");
    }

    #[test]
    fn test_entity_label() {
        assert_eq!(
            entity_label(&Contract::new("ProductCatalogContract")).as_str(),
            "ProductCatalog"
        );
        assert_eq!(
            entity_label(&Contract::new("UserContract").with_entity_name("userProfile")).as_str(),
            "userProfile"
        );
    }
}

//! Contract definitions: the declarative snapshot of one persistent entity.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Field, IndexSpec};

/// Storage options declared on a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractOptions {
    /// Explicit physical table name; takes precedence over derived names.
    pub schema_name: Option<String>,
    /// Synthesize `created_at` / `updated_at` columns.
    pub timestamps: bool,
    /// Synthesize a `deleted` column and its implicit index.
    pub soft_delete: bool,
    /// Synthesize `created_by` / `updated_by` columns.
    pub audit_user: bool,
    /// Shared base contract with no physical table. Module contracts never
    /// participate in migration generation.
    pub module: bool,
}

/// A declarative snapshot describing one persistent entity.
///
/// Contracts are plain data: they are constructed fresh by an upstream loader
/// on every diff invocation, and the engine holds no state between calls.
/// Fields live in an [`IndexMap`] so insertion order (column emission order)
/// is preserved while diffing stays keyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Declared contract name (e.g. `ProductCatalogContract`).
    pub name: SmolStr,
    /// Logical entity name from the owning controller, if any.
    pub entity_name: Option<SmolStr>,
    /// Property definitions, keyed by field key.
    pub fields: IndexMap<SmolStr, Field>,
    /// Explicit composite/unique indexes.
    pub indexes: Vec<IndexSpec>,
    /// Storage options.
    pub options: ContractOptions,
}

impl Contract {
    /// Create an empty contract.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            entity_name: None,
            fields: IndexMap::new(),
            indexes: Vec::new(),
            options: ContractOptions::default(),
        }
    }

    /// Get the contract name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the logical entity name.
    pub fn with_entity_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    /// Replace the storage options.
    pub fn with_options(mut self, options: ContractOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a field. A later field with the same key replaces the earlier one,
    /// keeping keys unique by construction.
    pub fn add_field(&mut self, field: Field) {
        self.fields.insert(field.key.clone(), field);
    }

    /// Builder-style [`Contract::add_field`].
    pub fn with_field(mut self, field: Field) -> Self {
        self.add_field(field);
        self
    }

    /// Add an explicit index.
    pub fn add_index(&mut self, index: IndexSpec) {
        self.indexes.push(index);
    }

    /// Builder-style [`Contract::add_index`].
    pub fn with_index(mut self, index: IndexSpec) -> Self {
        self.add_index(index);
        self
    }

    /// Get a field by key.
    pub fn get_field(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Get the primary key field(s), in declaration order.
    pub fn primary_key_fields(&self) -> Vec<&Field> {
        self.fields.values().filter(|f| f.primary_key).collect()
    }

    /// Whether this is a module contract (no physical table).
    pub fn is_module(&self) -> bool {
        self.options.module
    }
}

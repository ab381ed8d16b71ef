//! Field definitions for the contract model.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{AbstractType, DefaultValue, Validation};

/// A foreign-key reference carried by a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Referenced table name.
    pub table: SmolStr,
    /// Referenced column name.
    pub column: SmolStr,
    /// Action taken when the referenced row is deleted.
    pub on_delete: Option<ReferentialAction>,
}

impl ForeignKey {
    /// Create a new foreign-key reference.
    pub fn new(table: impl Into<SmolStr>, column: impl Into<SmolStr>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            on_delete: None,
        }
    }

    /// Set the on-delete action.
    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = Some(action);
        self
    }
}

/// Referential action for foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// Delete dependent rows.
    Cascade,
    /// Refuse the delete.
    Restrict,
    /// Null out the referencing column.
    SetNull,
    /// Reset the referencing column to its default.
    SetDefault,
    /// Take no action.
    NoAction,
}

impl ReferentialAction {
    /// Parse an action from its declared name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Cascade" | "CASCADE" => Some(Self::Cascade),
            "Restrict" | "RESTRICT" => Some(Self::Restrict),
            "SetNull" | "SET NULL" => Some(Self::SetNull),
            "SetDefault" | "SET DEFAULT" => Some(Self::SetDefault),
            "NoAction" | "NO ACTION" => Some(Self::NoAction),
            _ => None,
        }
    }

    /// Get the SQL clause for this action.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// A relation link to another contract.
///
/// Links affect the emitted host type only; the physical column shape is
/// carried by the owning field and diffed like any other column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Name of the linked contract.
    pub contract: SmolStr,
}

impl Link {
    /// Create a link to another contract.
    pub fn new(contract: impl Into<SmolStr>) -> Self {
        Self {
            contract: contract.into(),
        }
    }
}

/// A single named, typed property of a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field key, unique within one contract snapshot.
    pub key: SmolStr,
    /// Abstract field type.
    pub abstract_type: AbstractType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column carries a unique constraint.
    pub unique: bool,
    /// Whether an implicit single-column index is requested.
    pub indexed: bool,
    /// Whether the field is array-valued.
    pub repeated: bool,
    /// Whether this field is part of the primary key.
    pub primary_key: bool,
    /// Declared default value. `None` means no default was declared.
    pub default: Option<DefaultValue>,
    /// Foreign-key reference, if any.
    pub foreign_key: Option<ForeignKey>,
    /// Relation link, if any.
    pub link: Option<Link>,
    /// Declarative validation rules, in declaration order.
    pub validations: Vec<Validation>,
}

impl Field {
    /// Create a new required, non-unique field.
    pub fn new(key: impl Into<SmolStr>, abstract_type: AbstractType) -> Self {
        Self {
            key: key.into(),
            abstract_type,
            nullable: false,
            unique: false,
            indexed: false,
            repeated: false,
            primary_key: false,
            default: None,
            foreign_key: None,
            link: None,
            validations: Vec::new(),
        }
    }

    /// Get the field key as a string.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mark the field nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Add a unique constraint.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Request an implicit single-column index.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Mark the field array-valued.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Mark the field as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attach a foreign-key reference.
    pub fn with_foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_key = Some(fk);
        self
    }

    /// Attach a relation link.
    pub fn with_link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }

    /// Append a validation rule.
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validations.push(validation);
        self
    }

    /// Storage column type for this field.
    pub fn storage_type(&self) -> &'static str {
        crate::mapper::storage_type(&self.abstract_type, self.repeated)
    }

    /// Host-language type for this field.
    pub fn host_type(&self) -> &'static str {
        crate::mapper::host_type(&self.abstract_type, self.repeated)
    }

    /// Whether this field has a declared default.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

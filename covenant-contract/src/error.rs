//! Error types for contract validation and identity resolution.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;

/// Errors that can occur while validating or resolving a contract.
#[derive(Error, Debug, Diagnostic)]
pub enum ContractError {
    /// No table identity could be derived: no schema name, no entity name,
    /// and no usable contract name.
    #[error(
        "contract `{contract}` has no table identity: set options.schema_name, an entity name, or a contract name"
    )]
    #[diagnostic(code(covenant::contract::missing_table_identity))]
    MissingTableIdentity { contract: String },

    /// Duplicate index name within one contract snapshot.
    #[error("duplicate index `{name}` in contract `{contract}`")]
    #[diagnostic(code(covenant::contract::duplicate_index))]
    DuplicateIndex { contract: String, name: String },

    /// An index references a field key the contract does not declare.
    #[error("index `{index}` in contract `{contract}` references unknown field `{field}`")]
    #[diagnostic(code(covenant::contract::unknown_index_field))]
    UnknownIndexField {
        contract: String,
        index: String,
        field: String,
    },

    /// More than one field is flagged as the primary key.
    #[error("contract `{contract}` declares {count} primary key fields")]
    #[diagnostic(code(covenant::contract::multiple_primary_keys))]
    MultiplePrimaryKeys { contract: String, count: usize },

    /// Validation failed with multiple issues.
    #[error("contract validation failed with {count} error(s)")]
    #[diagnostic(code(covenant::contract::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<ContractError>,
    },
}

impl ContractError {
    /// Create a missing-table-identity error.
    pub fn missing_table_identity(contract: impl Into<String>) -> Self {
        Self::MissingTableIdentity {
            contract: contract.into(),
        }
    }

    /// Create a duplicate-index error.
    pub fn duplicate_index(contract: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateIndex {
            contract: contract.into(),
            name: name.into(),
        }
    }

    /// Create an unknown-index-field error.
    pub fn unknown_index_field(
        contract: impl Into<String>,
        index: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::UnknownIndexField {
            contract: contract.into(),
            index: index.into(),
            field: field.into(),
        }
    }
}

//! Contract validation.
//!
//! Validates a contract snapshot for structural correctness before diffing:
//! - index names are unique within the snapshot
//! - indexes only reference declared field keys
//! - at most one field is flagged as the primary key
//!
//! Field-key uniqueness is guaranteed by construction (fields live in a keyed
//! map) and is not re-checked here.

use std::collections::HashSet;

use crate::error::{ContractError, ContractResult};
use crate::model::Contract;

/// Contract validator collecting all issues before reporting.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ContractError>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a contract snapshot.
    pub fn validate(&mut self, contract: &Contract) -> ContractResult<()> {
        self.errors.clear();

        self.check_index_names(contract);
        self.check_index_fields(contract);
        self.check_primary_keys(contract);

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ContractError::ValidationFailed {
                count: self.errors.len(),
                errors: std::mem::take(&mut self.errors),
            })
        }
    }

    /// Check for duplicate index names.
    fn check_index_names(&mut self, contract: &Contract) {
        let mut seen = HashSet::new();
        for index in &contract.indexes {
            if !seen.insert(index.name.as_str()) {
                self.errors
                    .push(ContractError::duplicate_index(contract.name(), index.name()));
            }
        }
    }

    /// Check that every index field key is declared on the contract.
    fn check_index_fields(&mut self, contract: &Contract) {
        for index in &contract.indexes {
            for field in &index.fields {
                if !contract.fields.contains_key(field) {
                    self.errors.push(ContractError::unknown_index_field(
                        contract.name(),
                        index.name(),
                        field.as_str(),
                    ));
                }
            }
        }
    }

    /// Check that at most one field is the primary key.
    fn check_primary_keys(&mut self, contract: &Contract) {
        let count = contract.primary_key_fields().len();
        if count > 1 {
            self.errors.push(ContractError::MultiplePrimaryKeys {
                contract: contract.name().to_string(),
                count,
            });
        }
    }
}

/// Validate a contract with a fresh validator.
pub fn validate_contract(contract: &Contract) -> ContractResult<()> {
    Validator::new().validate(contract)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AbstractType, Field, IndexSpec};

    fn user_contract() -> Contract {
        Contract::new("UserContract")
            .with_field(Field::new("id", AbstractType::Int64).primary_key())
            .with_field(Field::new("email", AbstractType::String))
    }

    #[test]
    fn test_valid_contract() {
        let contract =
            user_contract().with_index(IndexSpec::new("idx_user_email", vec!["email".into()]));
        assert!(validate_contract(&contract).is_ok());
    }

    #[test]
    fn test_duplicate_index_name() {
        let contract = user_contract()
            .with_index(IndexSpec::new("idx_user_email", vec!["email".into()]))
            .with_index(IndexSpec::new("idx_user_email", vec!["id".into()]));

        let err = validate_contract(&contract).unwrap_err();
        match err {
            ContractError::ValidationFailed { count, .. } => assert_eq!(count, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_index_field() {
        let contract =
            user_contract().with_index(IndexSpec::new("idx_user_phone", vec!["phone".into()]));
        assert!(validate_contract(&contract).is_err());
    }

    #[test]
    fn test_multiple_primary_keys() {
        let contract = user_contract()
            .with_field(Field::new("uuid", AbstractType::Uuid).primary_key());
        assert!(validate_contract(&contract).is_err());
    }

    #[test]
    fn test_empty_contract_is_valid() {
        // Zero fields and zero indexes is structurally valid.
        assert!(validate_contract(&Contract::new("EmptyContract")).is_ok());
    }
}

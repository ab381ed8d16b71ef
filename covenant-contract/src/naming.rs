//! Table identity resolution.
//!
//! The physical table name for a contract is derived with a fixed three-step
//! fallback, first match wins:
//!
//! 1. `options.schema_name`, used verbatim;
//! 2. the entity (controller) name, converted camelCase → snake_case;
//! 3. the contract name with a trailing `Contract` suffix stripped, converted
//!    to snake_case and lower-cased.
//!
//! Exhausting all three steps means the caller passed an invalid contract and
//! is the only error case.

use crate::error::{ContractError, ContractResult};
use crate::model::Contract;

/// Resolve the physical table name for a contract.
pub fn resolve_table_name(contract: &Contract) -> ContractResult<String> {
    if let Some(schema_name) = &contract.options.schema_name
        && !schema_name.is_empty()
    {
        return Ok(schema_name.clone());
    }

    if let Some(entity_name) = &contract.entity_name
        && !entity_name.is_empty()
    {
        return Ok(camel_to_snake(entity_name));
    }

    let name = contract.name();
    if !name.is_empty() {
        let stripped = name.strip_suffix("Contract").unwrap_or(name);
        if !stripped.is_empty() {
            return Ok(camel_to_snake(stripped).to_lowercase());
        }
    }

    Err(ContractError::missing_table_identity(contract.name()))
}

/// Convert a camelCase name to snake_case.
///
/// Names already containing separators (hyphens) pass through unchanged.
pub fn camel_to_snake(name: &str) -> String {
    if name.contains('-') {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContractOptions;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_name_wins() {
        let contract = Contract::new("ProductCatalogContract")
            .with_entity_name("orderDetails")
            .with_options(ContractOptions {
                schema_name: Some("custom_name".to_string()),
                ..Default::default()
            });

        assert_eq!(resolve_table_name(&contract).unwrap(), "custom_name");
    }

    #[test]
    fn test_entity_name_is_snake_cased() {
        let contract = Contract::new("ProductCatalogContract").with_entity_name("orderDetails");
        assert_eq!(resolve_table_name(&contract).unwrap(), "order_details");
    }

    #[test]
    fn test_contract_name_strips_suffix() {
        let contract = Contract::new("ProductCatalogContract");
        assert_eq!(resolve_table_name(&contract).unwrap(), "product_catalog");
    }

    #[test]
    fn test_empty_schema_name_is_skipped() {
        let contract = Contract::new("UserContract").with_options(ContractOptions {
            schema_name: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(resolve_table_name(&contract).unwrap(), "user");
    }

    #[test]
    fn test_no_identity_errors() {
        let contract = Contract::new("");
        assert!(resolve_table_name(&contract).is_err());
    }

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("userProfile"), "user_profile");
        assert_eq!(camel_to_snake("OrderDetails"), "order_details");
        assert_eq!(camel_to_snake("plain"), "plain");
    }

    #[test]
    fn test_hyphenated_names_pass_through() {
        assert_eq!(camel_to_snake("user-profile"), "user-profile");
    }
}

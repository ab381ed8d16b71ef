//! # covenant-contract
//!
//! Contract model for the Covenant migration engine.
//!
//! This crate provides:
//! - The [`Contract`] snapshot type: fields, indexes, and storage options for
//!   one persistent entity
//! - Abstract-to-storage and abstract-to-host type mapping
//! - Physical table name resolution
//! - Contract validation
//!
//! Contracts are plain structured data produced by an upstream loader; the
//! diff engine in `covenant-migrate` consumes two snapshots per entity and
//! holds no state of its own.
//!
//! ## Example
//!
//! ```rust
//! use covenant_contract::{AbstractType, Contract, Field, resolve_table_name};
//!
//! let contract = Contract::new("UserProfileContract")
//!     .with_field(Field::new("id", AbstractType::Int64).primary_key())
//!     .with_field(Field::new("email", AbstractType::String).unique());
//!
//! assert_eq!(resolve_table_name(&contract).unwrap(), "user_profile");
//! ```

pub mod error;
pub mod mapper;
pub mod model;
pub mod naming;
pub mod validator;

pub use error::{ContractError, ContractResult};
pub use mapper::{host_type, storage_type};
pub use model::{
    AbstractType, Contract, ContractOptions, DefaultValue, Field, ForeignKey, IndexSpec, Link,
    ReferentialAction, Validation,
};
pub use naming::{camel_to_snake, resolve_table_name};
pub use validator::{Validator, validate_contract};

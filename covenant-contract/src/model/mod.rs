//! Contract model: entities, fields, indexes, and option flags.

mod contract;
mod field;
mod index;
mod types;
mod value;

pub use contract::{Contract, ContractOptions};
pub use field::{Field, ForeignKey, Link, ReferentialAction};
pub use index::IndexSpec;
pub use types::AbstractType;
pub use value::{DefaultValue, Validation};

//! # covenant-migrate
//!
//! Contract-to-migration diff engine for Covenant.
//!
//! This crate provides functionality for:
//! - Expanding a contract snapshot into its effective physical schema
//! - Diffing two snapshots into added/removed/changed columns and indexes
//! - Synthesizing an ordered migration plan (create/alter/drop)
//! - Rendering the plan into a persisted, timestamped SQL artifact
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐     ┌───────────────┐     ┌──────────────┐
//! │ Contract pair │────▶│ Expand + Diff │────▶│ Synthesizer  │
//! └───────────────┘     └───────────────┘     └──────────────┘
//!                                                    │
//!                                                    ▼
//!                                             ┌──────────────┐
//!                                             │ SQL Renderer │
//!                                             └──────────────┘
//!                                                    │
//!                                                    ▼
//!                                             ┌──────────────┐
//!                                             │ Writer (fs)  │
//!                                             └──────────────┘
//! ```
//!
//! The engine is pure and stateless: each call takes both snapshots
//! explicitly, holds nothing between calls, and performs at most one scoped
//! write. Migration execution, history ledgers, and cross-entity ordering
//! belong to an external migration runner.
//!
//! ## Example
//!
//! ```rust,ignore
//! use covenant_contract::{AbstractType, Contract, Field};
//! use covenant_migrate::{GeneratorConfig, MigrationGenerator};
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let new = Contract::new("UserContract")
//!         .with_field(Field::new("id", AbstractType::Int64).primary_key())
//!         .with_field(Field::new("email", AbstractType::String).unique());
//!
//!     let config = GeneratorConfig::new().migrations_dir("./migrations");
//!     let generator = MigrationGenerator::new(config);
//!
//!     match generator.generate(None, Some(&new)).await? {
//!         Some(artifact) => println!("wrote {}", artifact.path.display()),
//!         None => println!("no changes"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod diff;
pub mod error;
pub mod expand;
pub mod file;
pub mod generator;
pub mod plan;
pub mod render;

// Re-exports
pub use diff::{
    ChangeDetail, ColumnChange, FieldChanges, IndexChange, IndexChanges, diff_fields, diff_indexes,
};
pub use error::{MigrateResult, MigrationError};
pub use expand::{ColumnDef, IndexDef, effective_columns, effective_indexes, entity_label};
pub use file::{FsMigrationWriter, MigrationArtifact, MigrationWriter, compute_checksum};
pub use generator::{GeneratorConfig, MigrationGenerator};
pub use plan::{MigrationPlan, Operation, TableSpec, synthesize};
pub use render::{MigrationScript, SqlRenderer};

//! Error types for the migration engine.

use thiserror::Error;

/// Result type alias for migration operations.
pub type MigrateResult<T> = Result<T, MigrationError>;

/// Errors that can occur during migration synthesis and persistence.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// File system error. Write failures surface unmodified: a partial
    /// migration file must never be silently swallowed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid contract input (identity resolution or validation).
    #[error("contract error: {0}")]
    Contract(#[from] covenant_contract::ContractError),

    /// General migration error.
    #[error("migration error: {0}")]
    Other(String),
}

impl MigrationError {
    /// Create an other error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

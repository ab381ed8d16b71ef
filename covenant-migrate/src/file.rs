//! Migration artifact persistence.
//!
//! The engine computes a deterministic artifact name and a fully rendered
//! text; persistence goes through the [`MigrationWriter`] trait so callers can
//! swap the filesystem out. Write failures propagate unmodified; a partial
//! migration file must never be silently swallowed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use smol_str::SmolStr;

use crate::error::MigrateResult;

/// Metadata for a persisted migration artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationArtifact {
    /// Path the artifact was written to (or would be, in dry-run mode).
    pub path: PathBuf,
    /// Artifact file name (`<epoch-millis>-<EntityName>.sql`).
    pub file_name: String,
    /// Entity label the artifact was generated for.
    pub entity: SmolStr,
    /// Checksum of the artifact content.
    pub checksum: String,
}

/// Compute the checksum for migration content.
pub fn compute_checksum(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Persistence boundary for migration artifacts.
#[async_trait]
pub trait MigrationWriter: Send + Sync {
    /// Ensure the target directory exists.
    async fn ensure_dir(&self) -> MigrateResult<()>;

    /// Write one artifact and return the path it landed at.
    async fn write(&self, file_name: &str, content: &str) -> MigrateResult<PathBuf>;
}

/// Filesystem-backed migration writer.
pub struct FsMigrationWriter {
    migrations_dir: PathBuf,
}

impl FsMigrationWriter {
    /// Create a writer rooted at the given directory.
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            migrations_dir: migrations_dir.into(),
        }
    }

    /// Get the migrations directory.
    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }
}

#[async_trait]
impl MigrationWriter for FsMigrationWriter {
    async fn ensure_dir(&self) -> MigrateResult<()> {
        tokio::fs::create_dir_all(&self.migrations_dir).await?;
        Ok(())
    }

    async fn write(&self, file_name: &str, content: &str) -> MigrateResult<PathBuf> {
        let path = self.migrations_dir.join(file_name);
        tokio::fs::write(&path, content).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable() {
        let a = compute_checksum("CREATE TABLE \"users\" ();");
        let b = compute_checksum("CREATE TABLE \"users\" ();");
        let c = compute_checksum("DROP TABLE \"users\";");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[tokio::test]
    async fn test_fs_writer_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsMigrationWriter::new(dir.path().join("migrations"));

        writer.ensure_dir().await.unwrap();
        let path = writer
            .write("1700000000000-User.sql", "-- up\nSELECT 1;")
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("SELECT 1"));
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        // Missing parent directory: ensure_dir was never called.
        let writer = FsMigrationWriter::new("/nonexistent/covenant/migrations");
        let result = writer.write("x.sql", "SELECT 1;").await;
        assert!(result.is_err());
    }
}

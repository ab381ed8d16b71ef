//! Migration generation: synthesis, rendering, and persistence in one call.

use std::path::PathBuf;

use chrono::Utc;

use covenant_contract::Contract;

use crate::error::MigrateResult;
use crate::file::{FsMigrationWriter, MigrationArtifact, MigrationWriter, compute_checksum};
use crate::plan::{MigrationPlan, synthesize};
use crate::render::SqlRenderer;

/// Configuration for the migration generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory migration artifacts are written to.
    pub migrations_dir: PathBuf,
    /// Render and name the artifact without writing it.
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from("./migrations"),
            dry_run: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the migrations directory.
    pub fn migrations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.migrations_dir = dir.into();
        self
    }

    /// Enable dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Generates and persists migrations for one entity at a time.
///
/// Each call is a pure function of its two snapshots plus a single scoped
/// write; invocations for different entities are safe to run concurrently,
/// and serializing same-entity invocations is the caller's responsibility.
pub struct MigrationGenerator<W = FsMigrationWriter> {
    config: GeneratorConfig,
    writer: W,
}

impl MigrationGenerator<FsMigrationWriter> {
    /// Create a generator writing to the configured migrations directory.
    pub fn new(config: GeneratorConfig) -> Self {
        let writer = FsMigrationWriter::new(config.migrations_dir.clone());
        Self { config, writer }
    }
}

impl<W: MigrationWriter> MigrationGenerator<W> {
    /// Create a generator with a custom writer.
    pub fn with_writer(config: GeneratorConfig, writer: W) -> Self {
        Self { config, writer }
    }

    /// Generate the migration taking `old` to `new`.
    ///
    /// Returns `Ok(None)` when no migration is needed (identical snapshots,
    /// module contracts, or both sides absent); nothing is written in that
    /// case. Otherwise renders the plan, persists the artifact, and returns
    /// its metadata. Write failures propagate unmodified.
    pub async fn generate(
        &self,
        old: Option<&Contract>,
        new: Option<&Contract>,
    ) -> MigrateResult<Option<MigrationArtifact>> {
        let Some(plan) = synthesize(old, new)? else {
            #[cfg(feature = "tracing")]
            tracing::debug!("no schema changes detected");
            return Ok(None);
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(entity = %plan.entity, table = %plan.table, summary = %plan.summary(), "synthesized migration plan");

        let file_name = artifact_file_name(&plan);
        let content = render_artifact(&plan);
        let checksum = compute_checksum(&content);

        if self.config.dry_run {
            return Ok(Some(MigrationArtifact {
                path: self.config.migrations_dir.join(&file_name),
                file_name,
                entity: plan.entity,
                checksum,
            }));
        }

        self.writer.ensure_dir().await?;
        let path = self.writer.write(&file_name, &content).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), "wrote migration artifact");

        Ok(Some(MigrationArtifact {
            path,
            file_name,
            entity: plan.entity,
            checksum,
        }))
    }
}

/// Deterministic artifact name: `<epoch-millis>-<EntityName>.sql`.
fn artifact_file_name(plan: &MigrationPlan) -> String {
    format!("{}-{}.sql", Utc::now().timestamp_millis(), plan.entity)
}

/// Render a plan into the persisted artifact text.
fn render_artifact(plan: &MigrationPlan) -> String {
    let script = SqlRenderer.render(plan);

    let mut out = String::new();
    out.push_str(&format!(
        "-- Migration for {} (table \"{}\")\n-- {}\n\n",
        plan.entity,
        plan.table,
        plan.summary()
    ));
    out.push_str("-- up\n");
    out.push_str(&script.up);
    out.push('\n');
    if !script.down.trim().is_empty() {
        out.push_str("\n-- down\n");
        out.push_str(&script.down);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_contract::{AbstractType, Field};

    fn user_contract() -> Contract {
        Contract::new("UserContract")
            .with_field(Field::new("id", AbstractType::Int64).primary_key())
            .with_field(Field::new("email", AbstractType::String).unique())
    }

    #[test]
    fn test_artifact_file_name_shape() {
        let plan = synthesize(None, Some(&user_contract())).unwrap().unwrap();
        let name = artifact_file_name(&plan);

        let (timestamp, rest) = name.split_once('-').unwrap();
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(rest, "User.sql");
    }

    #[test]
    fn test_render_artifact_sections() {
        let plan = synthesize(None, Some(&user_contract())).unwrap().unwrap();
        let content = render_artifact(&plan);

        assert!(content.starts_with("-- Migration for User"));
        assert!(content.contains("-- up\n"));
        assert!(content.contains("-- down\n"));
        assert!(content.contains("CREATE TABLE \"user\""));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new()
            .migrations_dir(dir.path().join("migrations"))
            .dry_run(true);
        let generator = MigrationGenerator::new(config);

        let artifact = generator
            .generate(None, Some(&user_contract()))
            .await
            .unwrap()
            .unwrap();

        assert!(!artifact.checksum.is_empty());
        assert!(!dir.path().join("migrations").exists());
    }

    #[tokio::test]
    async fn test_no_changes_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let generator =
            MigrationGenerator::new(GeneratorConfig::new().migrations_dir(dir.path()));

        let a = user_contract();
        let b = user_contract();
        assert!(generator.generate(Some(&a), Some(&b)).await.unwrap().is_none());
    }
}

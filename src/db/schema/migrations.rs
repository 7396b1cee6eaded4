//! Schema creation and versioning.
//!
//! - The schema version is derived from which relations exist
//! - Pending migration sets are applied in version order
//! - Migrations are idempotent (safe to run multiple times)

use std::error::Error;

use tracing::info;

use crate::db::backend::DatabaseBackend;
use crate::db::schema::compilers::CozoCompiler;
use crate::db::schema::definition::SchemaRelation;
use crate::db::schema::relations::ALL_RELATIONS;

/// A set of relations created together under one schema version.
#[derive(Debug)]
pub struct MigrationSet {
    /// Version number for this set
    pub version: u32,
    /// Human-readable description
    pub description: &'static str,
    /// Relations to create in this migration, in dependency order
    pub relations: &'static [&'static SchemaRelation],
}

/// All available migrations, indexed by version.
pub const MIGRATION_SETS: &[MigrationSet] = &[MigrationSet {
    version: 1,
    description: "Initial social schema",
    relations: ALL_RELATIONS,
}];

/// Outcome of creating one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationOutcome {
    pub relation: String,
    pub created: bool,
}

/// Get the current schema version from the database.
///
/// The version is the highest migration set whose relations all exist;
/// 0 means the database is not initialized.
pub fn get_current_version(backend: &dyn DatabaseBackend) -> Result<u32, Box<dyn Error>> {
    let mut version = 0;
    for set in MIGRATION_SETS {
        for relation in set.relations {
            if !backend.relation_exists(relation.name)? {
                return Ok(version);
            }
        }
        version = set.version;
    }
    Ok(version)
}

/// Relation names managed by the migrations, in creation order.
pub fn relation_names() -> Vec<&'static str> {
    MIGRATION_SETS
        .iter()
        .flat_map(|set| set.relations.iter().map(|relation| relation.name))
        .collect()
}

/// Run all pending migrations.
///
/// Every relation of every set is visited so that a partially created schema
/// is completed; relations that already exist are reported as not created.
pub fn run_migrations(backend: &dyn DatabaseBackend) -> Result<Vec<RelationOutcome>, Box<dyn Error>> {
    let current_version = get_current_version(backend)?;
    let mut outcomes = Vec::new();

    for migration in MIGRATION_SETS {
        for relation in migration.relations {
            let created = if backend.relation_exists(relation.name)? {
                false
            } else {
                backend.try_create_relation(&CozoCompiler::compile_relation(relation))?
            };

            if created {
                info!(relation = relation.name, version = migration.version, "created relation");
            }

            outcomes.push(RelationOutcome {
                relation: relation.name.to_string(),
                created,
            });
        }

        if migration.version > current_version {
            info!(version = migration.version, description = migration.description, "schema migrated");
        }
    }

    Ok(outcomes)
}

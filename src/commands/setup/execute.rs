use std::error::Error;

use serde::Serialize;

use super::SetupCmd;
use crate::commands::Execute;
use crate::db::schema::migrations::{relation_names, run_migrations};
use crate::db::DatabaseBackend;

/// Status of a database relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RelationState {
    #[serde(rename = "created")]
    Created,
    #[serde(rename = "exists")]
    AlreadyExists,
    #[serde(rename = "would_create")]
    WouldCreate,
}

/// Status information for a single database relation
#[derive(Debug, Clone, Serialize)]
pub struct RelationStatus {
    pub name: String,
    pub status: RelationState,
}

/// Result of the setup command execution
#[derive(Debug, Serialize)]
pub struct SetupResult {
    pub relations: Vec<RelationStatus>,
    pub created_new: bool,
    pub dry_run: bool,
}

impl Execute for SetupCmd {
    type Output = SetupResult;

    fn execute(self, db: &dyn DatabaseBackend) -> Result<Self::Output, Box<dyn Error>> {
        if self.dry_run {
            let relations = relation_names()
                .into_iter()
                .map(|name| -> Result<RelationStatus, Box<dyn Error>> {
                    let status = if db.relation_exists(name)? {
                        RelationState::AlreadyExists
                    } else {
                        RelationState::WouldCreate
                    };
                    Ok(RelationStatus {
                        name: name.to_string(),
                        status,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            return Ok(SetupResult {
                relations,
                created_new: false,
                dry_run: true,
            });
        }

        let relations: Vec<RelationStatus> = run_migrations(db)?
            .into_iter()
            .map(|outcome| RelationStatus {
                name: outcome.relation,
                status: if outcome.created {
                    RelationState::Created
                } else {
                    RelationState::AlreadyExists
                },
            })
            .collect();

        let created_new = relations.iter().any(|r| r.status == RelationState::Created);

        Ok(SetupResult {
            relations,
            created_new,
            dry_run: false,
        })
    }
}

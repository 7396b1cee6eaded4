//! Database connection management.
//!
//! `CozoBackend` wraps a `cozo::DbInstance` and implements `DatabaseBackend`
//! for both the SQLite-backed and the in-memory storage engines.

use std::error::Error;
use std::path::Path;

use cozo::{DbInstance, ScriptMutability};
use tracing::debug;

use super::backend::{DatabaseBackend, Params, QueryResult};
use super::schema::compilers::CozoCompiler;
use super::schema::SchemaRelation;
use super::value::DatabaseValue;
use super::DbError;

/// CozoDB backend over either SQLite or in-memory storage.
pub struct CozoBackend {
    db: DbInstance,
    name: &'static str,
}

impl CozoBackend {
    /// Open a CozoDB database backed by SQLite storage.
    pub fn open_sqlite(path: &Path) -> Result<Self, DbError> {
        let db = DbInstance::new("sqlite", path, "").map_err(|e| DbError::OpenFailed {
            path: path.display().to_string(),
            message: format!("{:?}", e),
        })?;
        Ok(Self { db, name: "CozoSqlite" })
    }

    /// Open an in-memory CozoDB database.
    pub fn open_mem() -> Result<Self, DbError> {
        let db = DbInstance::new("mem", "", "").map_err(|e| DbError::OpenFailed {
            path: ":memory:".to_string(),
            message: format!("{:?}", e),
        })?;
        Ok(Self { db, name: "CozoMem" })
    }
}

impl DatabaseBackend for CozoBackend {
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, Box<dyn Error>> {
        debug!(backend = self.name, script, "running script");
        let rows = self
            .db
            .run_script(script, params.clone(), ScriptMutability::Mutable)
            .map_err(|e| DbError::QueryFailed {
                message: format!("{:?}", e),
            })?;
        Ok(QueryResult {
            headers: rows.headers,
            rows: rows.rows,
        })
    }

    fn backend_name(&self) -> &'static str {
        self.name
    }

    fn relation_exists(&self, name: &str) -> Result<bool, Box<dyn Error>> {
        let result = self.execute_query_no_params("::relations")?;
        Ok(result
            .rows
            .iter()
            .any(|row| row.first().and_then(|v| v.as_string()).as_deref() == Some(name)))
    }

    fn try_create_relation(&self, ddl: &str) -> Result<bool, Box<dyn Error>> {
        match self.execute_query_no_params(ddl) {
            Ok(_) => Ok(true),
            Err(e) => {
                let err_str = e.to_string();
                if err_str.contains("AlreadyExists") || err_str.contains("stored_relation_conflict") {
                    Ok(false)
                } else {
                    Err(e)
                }
            }
        }
    }

    fn clear_relation(&self, relation: &SchemaRelation) -> Result<(), Box<dyn Error>> {
        self.execute_query_no_params(&CozoCompiler::compile_clear(relation))?;
        Ok(())
    }
}

/// Open a CozoDB database backed by SQLite storage.
pub fn open_db(path: &Path) -> Result<Box<dyn DatabaseBackend>, Box<dyn Error>> {
    Ok(Box::new(CozoBackend::open_sqlite(path)?))
}

/// Create an in-memory database instance.
///
/// Used for tests to avoid disk I/O and temp file management.
#[cfg(test)]
pub fn open_mem_db() -> Box<dyn DatabaseBackend> {
    Box::new(CozoBackend::open_mem().expect("Failed to create in-memory DB"))
}

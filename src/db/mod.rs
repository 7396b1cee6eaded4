//! Database connection and query utilities for CozoDB.
//!
//! This module provides the database abstraction layer:
//! - Connection management (SQLite-backed or in-memory for tests)
//! - Query execution with parameter binding
//! - Result value extraction
//! - The schema definition and its compilers
//!
//! # Architecture
//!
//! CozoDB is a Datalog database. Each entity of the social schema is a stored
//! relation keyed by `id`. Scripts are written in CozoScript and return rows of
//! `DataValue` cells that the store decodes into typed rows.
//!
//! # Type Decisions
//!
//! **Why `i64` for identifiers?**
//! CozoDB returns all integers as `Num::Int(i64)`. Using `i64` throughout avoids
//! lossy conversions.
//!
//! **Why no database-level foreign keys?**
//! Cozo stored relations carry no foreign-key constraints, so referential
//! integrity is enforced by the store before every write.

mod backend;
mod config;
mod connection;
mod query;
pub mod schema;
mod value;

pub use backend::{DatabaseBackend, Params, QueryResult};
pub use config::{DatabaseConfig, DEFAULT_DB_PATH};
pub use connection::{open_db, CozoBackend};
#[cfg(test)]
pub use connection::open_mem_db;
pub use query::{params, query_exists, query_single_i64, run_query, run_query_no_params};
pub use value::{int_value, opt_str_value, str_value, DatabaseValue};

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Unknown relation: {name}")]
    UnknownRelation { name: String },
}

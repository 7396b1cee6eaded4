//! Query execution utilities.
//!
//! Thin helpers over `DatabaseBackend` that bind named parameters and decode
//! the common single-value result shapes.

use std::error::Error;

use cozo::DataValue;

use super::backend::{DatabaseBackend, Params, QueryResult};
use super::value::DatabaseValue;

/// Build a parameter map from `(name, value)` pairs.
pub fn params<const N: usize>(pairs: [(&str, DataValue); N]) -> Params {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Run a query with parameters.
pub fn run_query(
    db: &dyn DatabaseBackend,
    script: &str,
    params: Params,
) -> Result<QueryResult, Box<dyn Error>> {
    db.execute_query(script, &params)
}

/// Run a query with no parameters.
pub fn run_query_no_params(db: &dyn DatabaseBackend, script: &str) -> Result<QueryResult, Box<dyn Error>> {
    run_query(db, script, Params::new())
}

/// Run a query whose result is a single integer cell (e.g. an aggregate).
///
/// Returns `None` for an empty result or a null cell.
pub fn query_single_i64(
    db: &dyn DatabaseBackend,
    script: &str,
    params: Params,
) -> Result<Option<i64>, Box<dyn Error>> {
    let result = run_query(db, script, params)?;
    Ok(result
        .rows
        .first()
        .and_then(|row| row.first())
        .and_then(|value| value.as_i64()))
}

/// Run a query and report whether it returned at least one row.
pub fn query_exists(
    db: &dyn DatabaseBackend,
    script: &str,
    params: Params,
) -> Result<bool, Box<dyn Error>> {
    Ok(!run_query(db, script, params)?.is_empty())
}

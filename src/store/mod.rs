//! Typed persistence for the social schema.
//!
//! Every write goes through [`integrity::validate_row`], which enforces the
//! constraints declared in the schema (non-null, length bound, enumerated
//! values, foreign keys). Relationship accessors such as `user.posts` are
//! implemented as explicit lookups by foreign key.

pub mod comments;
pub mod followers;
pub mod import;
pub mod integrity;
pub mod media;
pub mod posts;
pub mod users;

use std::error::Error;

use cozo::DataValue;
use thiserror::Error;
use tracing::debug;

use crate::db::schema::compilers::CozoCompiler;
use crate::db::schema::{SchemaRelation, ALL_RELATIONS};
use crate::db::{int_value, params, query_exists, query_single_i64, run_query, DatabaseBackend, DatabaseValue, Params};

pub use integrity::{check_integrity, validate_row, IntegrityReport};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{relation}.{field} must not be null")]
    NotNull { relation: String, field: String },

    #[error("{relation}.{field} exceeds {max} characters")]
    TooLong { relation: String, field: String, max: usize },

    #[error("{relation}.{field} must be one of [{allowed}], got '{value}'")]
    InvalidEnumValue {
        relation: String,
        field: String,
        value: String,
        allowed: String,
    },

    #[error("Foreign key violation: {relation}.{field} = {value} references a missing {target} row")]
    ForeignKeyViolation {
        relation: String,
        field: String,
        value: i64,
        target: String,
    },

    #[error("Duplicate key: {relation} with id {id} already exists")]
    DuplicateKey { relation: String, id: i64 },

    #[error("Cannot delete {relation} {id}: still referenced by {referenced_by}.{field}")]
    StillReferenced {
        relation: String,
        id: i64,
        referenced_by: String,
        field: String,
    },

    #[error("No identifiers left in {relation}: highest id is {max}")]
    IdSpaceExhausted { relation: String, max: i64 },

    #[error("{relation} {id} not found")]
    NotFound { relation: String, id: i64 },

    #[error("Malformed {relation} row: {message}")]
    MalformedRow { relation: String, message: String },
}

/// Decode a typed row from the columns of `relation`, in schema order.
pub trait FromRow: Sized {
    const RELATION: &'static SchemaRelation;

    fn from_row(row: &[DataValue]) -> Result<Self, StoreError>;
}

/// Column accessor used by `FromRow` implementations.
pub(crate) struct RowReader<'a> {
    relation: &'static SchemaRelation,
    row: &'a [DataValue],
}

impl<'a> RowReader<'a> {
    pub(crate) fn new(relation: &'static SchemaRelation, row: &'a [DataValue]) -> Result<Self, StoreError> {
        if row.len() != relation.field_count() {
            return Err(StoreError::MalformedRow {
                relation: relation.name.to_string(),
                message: format!("expected {} columns, got {}", relation.field_count(), row.len()),
            });
        }
        Ok(Self { relation, row })
    }

    fn cell(&self, field: &str) -> Result<&DataValue, StoreError> {
        self.relation
            .all_fields()
            .position(|f| f.name == field)
            .and_then(|idx| self.row.get(idx))
            .ok_or_else(|| StoreError::MalformedRow {
                relation: self.relation.name.to_string(),
                message: format!("missing column '{}'", field),
            })
    }

    fn mismatch(&self, field: &str, value: &DataValue) -> StoreError {
        StoreError::MalformedRow {
            relation: self.relation.name.to_string(),
            message: format!("column '{}' holds a {}", field, value.type_name()),
        }
    }

    pub(crate) fn i64(&self, field: &str) -> Result<i64, StoreError> {
        let value = self.cell(field)?;
        value.as_i64().ok_or_else(|| self.mismatch(field, value))
    }

    pub(crate) fn string(&self, field: &str) -> Result<String, StoreError> {
        let value = self.cell(field)?;
        value.as_string().ok_or_else(|| self.mismatch(field, value))
    }

    pub(crate) fn opt_string(&self, field: &str) -> Result<Option<String>, StoreError> {
        let value = self.cell(field)?;
        if value.is_null() {
            return Ok(None);
        }
        value.as_string().map(Some).ok_or_else(|| self.mismatch(field, value))
    }
}

/// Identifier for a new row: the explicit one if given and free, otherwise
/// one past the highest stored id (starting at 1).
pub(crate) fn resolve_id(
    db: &dyn DatabaseBackend,
    relation: &SchemaRelation,
    explicit: Option<i64>,
) -> Result<i64, Box<dyn Error>> {
    match explicit {
        Some(id) => {
            if row_exists(db, relation, id)? {
                return Err(StoreError::DuplicateKey {
                    relation: relation.name.to_string(),
                    id,
                }
                .into());
            }
            Ok(id)
        }
        None => {
            match query_single_i64(db, &CozoCompiler::compile_max_id(relation), Params::new())? {
                None => Ok(1),
                Some(max) => max.checked_add(1).ok_or_else(|| {
                    StoreError::IdSpaceExhausted {
                        relation: relation.name.to_string(),
                        max,
                    }
                    .into()
                }),
            }
        }
    }
}

/// True if `relation` holds a row with this id.
pub fn row_exists(db: &dyn DatabaseBackend, relation: &SchemaRelation, id: i64) -> Result<bool, Box<dyn Error>> {
    query_exists(
        db,
        &CozoCompiler::compile_exists_where(relation, "id"),
        params([("value", int_value(id))]),
    )
}

/// Validate and write one row. `values` must bind every column of `relation`.
pub(crate) fn insert_row(
    db: &dyn DatabaseBackend,
    relation: &SchemaRelation,
    values: Params,
) -> Result<(), Box<dyn Error>> {
    validate_row(db, relation, &values)?;
    debug!(relation = relation.name, ?values, "inserting row");
    run_query(db, &CozoCompiler::compile_put(relation), values)?;
    Ok(())
}

/// Fetch a single row by id.
pub fn fetch_by_id<T: FromRow>(db: &dyn DatabaseBackend, id: i64) -> Result<Option<T>, Box<dyn Error>> {
    let mut rows = fetch_where::<T>(db, "id", int_value(id))?;
    Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
}

/// Fetch every row whose `column` equals `value`, ordered by id.
pub fn fetch_where<T: FromRow>(
    db: &dyn DatabaseBackend,
    column: &str,
    value: DataValue,
) -> Result<Vec<T>, Box<dyn Error>> {
    let script = CozoCompiler::compile_select_where(T::RELATION, column);
    let result = run_query(db, &script, params([("value", value)]))?;
    decode_rows(&result.rows)
}

/// Fetch every row of the relation, ordered by id.
pub fn fetch_all<T: FromRow>(db: &dyn DatabaseBackend) -> Result<Vec<T>, Box<dyn Error>> {
    let script = CozoCompiler::compile_select_all(T::RELATION);
    let result = run_query(db, &script, Params::new())?;
    decode_rows(&result.rows)
}

pub(crate) fn decode_rows<T: FromRow>(rows: &[Vec<DataValue>]) -> Result<Vec<T>, Box<dyn Error>> {
    rows.iter()
        .map(|row| T::from_row(row).map_err(|e| Box::new(e) as Box<dyn Error>))
        .collect()
}

/// Delete a row by id with restrict semantics: the delete fails while any
/// other row still references it. Nothing cascades.
pub fn delete_row(db: &dyn DatabaseBackend, relation: &SchemaRelation, id: i64) -> Result<(), Box<dyn Error>> {
    if !row_exists(db, relation, id)? {
        return Err(StoreError::NotFound {
            relation: relation.name.to_string(),
            id,
        }
        .into());
    }

    for referencing in ALL_RELATIONS {
        for (field, fk) in referencing.foreign_keys() {
            if fk.relation != relation.name {
                continue;
            }
            let script = CozoCompiler::compile_exists_where(referencing, field.name);
            if query_exists(db, &script, params([("value", int_value(id))]))? {
                return Err(StoreError::StillReferenced {
                    relation: relation.name.to_string(),
                    id,
                    referenced_by: referencing.name.to_string(),
                    field: field.name.to_string(),
                }
                .into());
            }
        }
    }

    debug!(relation = relation.name, id, "deleting row");
    run_query(db, &CozoCompiler::compile_delete(relation), params([("id", int_value(id))]))?;
    Ok(())
}

/// Downcast a boxed error to a `StoreError`, if it is one.
pub fn as_store_error<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a StoreError> {
    err.downcast_ref::<StoreError>()
}

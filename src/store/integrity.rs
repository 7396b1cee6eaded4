//! Constraint validation and integrity reporting.
//!
//! `validate_row` is the write-time gate: it checks a row against the schema
//! declaration before it is stored. `check_integrity` scans rows that are
//! already stored, which catches data written around the store.

use std::collections::BTreeMap;
use std::error::Error;

use cozo::{DataValue, Num};
use serde::Serialize;
use tracing::warn;

use super::{fetch_all, row_exists, StoreError};
use crate::db::schema::compilers::CozoCompiler;
use crate::db::schema::{find_relation, DataType, SchemaRelation, ALL_RELATIONS, MEDIA};
use crate::db::{run_query, run_query_no_params, DatabaseBackend, DatabaseValue, DbError, Params};
use crate::types::Follower;

/// Check a row against every constraint declared on `relation`.
///
/// A column missing from `values` is treated as null.
pub fn validate_row(
    db: &dyn DatabaseBackend,
    relation: &SchemaRelation,
    values: &Params,
) -> Result<(), Box<dyn Error>> {
    for field in relation.all_fields() {
        let value = values.get(field.name).unwrap_or(&DataValue::Null);

        if value.is_null() {
            if field.nullable {
                continue;
            }
            return Err(StoreError::NotNull {
                relation: relation.name.to_string(),
                field: field.name.to_string(),
            }
            .into());
        }

        let type_matches = match field.data_type {
            DataType::String => matches!(value, DataValue::Str(_)),
            DataType::Int => matches!(value, DataValue::Num(Num::Int(_))),
        };
        if !type_matches {
            return Err(StoreError::MalformedRow {
                relation: relation.name.to_string(),
                message: format!(
                    "column '{}' expects {}, got {}",
                    field.name,
                    field.data_type.cozo_type(),
                    value.type_name()
                ),
            }
            .into());
        }

        if let Some(text) = value.as_string() {
            if let Some(max) = field.max_len {
                if text.chars().count() > max {
                    return Err(StoreError::TooLong {
                        relation: relation.name.to_string(),
                        field: field.name.to_string(),
                        max,
                    }
                    .into());
                }
            }
            if field.is_enumerated() && !field.allowed_values.contains(&text.as_str()) {
                return Err(StoreError::InvalidEnumValue {
                    relation: relation.name.to_string(),
                    field: field.name.to_string(),
                    value: text,
                    allowed: field.allowed_values.join(", "),
                }
                .into());
            }
        }

        if let Some(fk) = field.references {
            let target = find_relation(fk.relation).ok_or_else(|| DbError::UnknownRelation {
                name: fk.relation.to_string(),
            })?;
            let id = value.as_i64().ok_or_else(|| StoreError::MalformedRow {
                relation: relation.name.to_string(),
                message: format!("column '{}' holds a {}", field.name, value.type_name()),
            })?;
            if !row_exists(db, target, id)? {
                return Err(StoreError::ForeignKeyViolation {
                    relation: relation.name.to_string(),
                    field: field.name.to_string(),
                    value: id,
                    target: target.name.to_string(),
                }
                .into());
            }
        }
    }

    Ok(())
}

/// A stored row whose foreign key resolves to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanedRow {
    pub relation: String,
    pub id: i64,
    pub field: String,
    pub value: i64,
    pub target: String,
}

/// A stored row holding a value outside its enumerated set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidValue {
    pub relation: String,
    pub id: i64,
    pub field: String,
    pub value: String,
}

/// Follow edges recorded more than once for the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateFollow {
    pub user_from_id: i64,
    pub user_to_id: i64,
    pub follower_ids: Vec<i64>,
}

/// Everything `check_integrity` found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub orphaned: Vec<OrphanedRow>,
    pub invalid_values: Vec<InvalidValue>,
    pub duplicate_follows: Vec<DuplicateFollow>,
    pub self_follows: Vec<Follower>,
}

impl IntegrityReport {
    /// True when no constraint is violated. Duplicate and self follows are
    /// reported but do not count as violations.
    pub fn is_consistent(&self) -> bool {
        self.orphaned.is_empty() && self.invalid_values.is_empty()
    }

    /// True when nothing at all was reported.
    pub fn is_clean(&self) -> bool {
        self.is_consistent() && self.duplicate_follows.is_empty() && self.self_follows.is_empty()
    }
}

/// Scan every stored relation for integrity problems.
pub fn check_integrity(db: &dyn DatabaseBackend) -> Result<IntegrityReport, Box<dyn Error>> {
    let mut report = IntegrityReport::default();

    for relation in ALL_RELATIONS {
        for (field, fk) in relation.foreign_keys() {
            let Some(script) = CozoCompiler::compile_orphans(relation, field) else {
                continue;
            };
            let result = run_query_no_params(db, &script)?;
            for row in result.rows {
                let orphan = OrphanedRow {
                    relation: relation.name.to_string(),
                    id: row.first().map(|v| v.as_i64_or(0)).unwrap_or(0),
                    field: field.name.to_string(),
                    value: row.get(1).map(|v| v.as_i64_or(0)).unwrap_or(0),
                    target: fk.relation.to_string(),
                };
                warn!(?orphan, "orphaned foreign key");
                report.orphaned.push(orphan);
            }
        }
    }

    report.invalid_values = invalid_media_types(db)?;

    let follows: Vec<Follower> = fetch_all(db)?;
    let mut pairs: BTreeMap<(i64, i64), Vec<i64>> = BTreeMap::new();
    for follow in &follows {
        pairs
            .entry((follow.user_from_id, follow.user_to_id))
            .or_default()
            .push(follow.id);
    }
    report.duplicate_follows = pairs
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|((user_from_id, user_to_id), follower_ids)| DuplicateFollow {
            user_from_id,
            user_to_id,
            follower_ids,
        })
        .collect();
    report.self_follows = follows
        .into_iter()
        .filter(|f| f.user_from_id == f.user_to_id)
        .collect();

    Ok(report)
}

/// Media rows whose `type` is not one of the enumerated variants.
///
/// Read raw so that a bad value is reported instead of failing the decode.
fn invalid_media_types(db: &dyn DatabaseBackend) -> Result<Vec<InvalidValue>, Box<dyn Error>> {
    let Some(field) = MEDIA.field("type") else {
        return Ok(Vec::new());
    };
    let result = run_query(
        db,
        "?[id, value] := *media{id, type: value}\n:order id",
        Params::new(),
    )?;

    Ok(result
        .rows
        .iter()
        .filter_map(|row| {
            let id = row.first()?.as_i64()?;
            let value = row.get(1)?.as_string_or("");
            if field.allowed_values.contains(&value.as_str()) {
                return None;
            }
            warn!(id, value = value.as_str(), "invalid media type");
            Some(InvalidValue {
                relation: MEDIA.name.to_string(),
                id,
                field: field.name.to_string(),
                value,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{int_value, params, str_value};
    use crate::db::schema::{COMMENT, FOLLOWER, POST, USER};
    use crate::store::{as_store_error, followers, users};
    use crate::test_utils::{migrated_db, seeded_db};
    use crate::types::NewUser;

    fn user_values(id: i64, username: &str, email: &str) -> Params {
        params([
            ("id", int_value(id)),
            ("username", str_value(username)),
            ("firstname", DataValue::Null),
            ("lastname", DataValue::Null),
            ("email", str_value(email)),
        ])
    }

    #[test]
    fn test_validate_accepts_valid_user() {
        let db = migrated_db();
        validate_row(&*db, &USER, &user_values(1, "ada", "ada@example.com")).unwrap();
    }

    #[test]
    fn test_validate_rejects_null_email() {
        let db = migrated_db();
        let mut values = user_values(1, "ada", "");
        values.insert("email".to_string(), DataValue::Null);
        let err = validate_row(&*db, &USER, &values).unwrap_err();
        assert_eq!(
            as_store_error(err.as_ref()),
            Some(&StoreError::NotNull { relation: "user".to_string(), field: "email".to_string() })
        );
    }

    #[test]
    fn test_validate_rejects_missing_column() {
        let db = migrated_db();
        let mut values = user_values(1, "ada", "ada@example.com");
        values.remove("username");
        let err = validate_row(&*db, &USER, &values).unwrap_err();
        assert!(matches!(as_store_error(err.as_ref()), Some(StoreError::NotNull { .. })));
    }

    #[test]
    fn test_validate_rejects_long_string() {
        let db = migrated_db();
        let values = user_values(1, &"x".repeat(251), "ada@example.com");
        let err = validate_row(&*db, &USER, &values).unwrap_err();
        assert!(matches!(as_store_error(err.as_ref()), Some(StoreError::TooLong { max: 250, .. })));
    }

    #[test]
    fn test_validate_accepts_string_at_bound() {
        let db = migrated_db();
        validate_row(&*db, &USER, &user_values(1, &"x".repeat(250), "ada@example.com")).unwrap();
    }

    #[test]
    fn test_validate_rejects_wrong_column_type() {
        let db = migrated_db();
        let mut values = user_values(1, "ada", "ada@example.com");
        values.insert("username".to_string(), int_value(7));
        let err = validate_row(&*db, &USER, &values).unwrap_err();
        assert_eq!(
            as_store_error(err.as_ref()),
            Some(&StoreError::MalformedRow {
                relation: "user".to_string(),
                message: "column 'username' expects String, got number".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_string_in_integer_column() {
        let db = seeded_db();
        let values = params([
            ("id", int_value(99)),
            ("user_id", str_value("1")),
        ]);
        let err = validate_row(&*db, &POST, &values).unwrap_err();
        assert!(matches!(as_store_error(err.as_ref()), Some(StoreError::MalformedRow { .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_media_type() {
        let db = seeded_db();
        let values = params([
            ("id", int_value(99)),
            ("type", str_value("audio")),
            ("url", str_value("https://cdn.example.com/a.mp3")),
            ("post_id", int_value(1)),
        ]);
        let err = validate_row(&*db, &MEDIA, &values).unwrap_err();
        assert!(matches!(
            as_store_error(err.as_ref()),
            Some(StoreError::InvalidEnumValue { value, .. }) if value == "audio"
        ));
    }

    #[test]
    fn test_validate_rejects_dangling_post_id() {
        let db = seeded_db();
        let values = params([
            ("id", int_value(99)),
            ("comment_text", str_value("hello")),
            ("author_id", int_value(1)),
            ("post_id", int_value(404)),
        ]);
        let err = validate_row(&*db, &COMMENT, &values).unwrap_err();
        assert_eq!(
            as_store_error(err.as_ref()),
            Some(&StoreError::ForeignKeyViolation {
                relation: "comment".to_string(),
                field: "post_id".to_string(),
                value: 404,
                target: "post".to_string(),
            })
        );
    }

    #[test]
    fn test_check_integrity_clean_on_seeded_db() {
        let db = seeded_db();
        let report = check_integrity(&*db).unwrap();
        assert!(report.is_clean(), "unexpected report: {:?}", report);
    }

    #[test]
    fn test_check_integrity_finds_orphans_written_around_the_store() {
        let db = seeded_db();
        // Raw writes bypass validation.
        run_query(
            &*db,
            &CozoCompiler::compile_put(&POST),
            params([("id", int_value(50)), ("user_id", int_value(777))]),
        )
        .unwrap();
        run_query(
            &*db,
            &CozoCompiler::compile_put(&FOLLOWER),
            params([("id", int_value(60)), ("user_from_id", int_value(1)), ("user_to_id", int_value(888))]),
        )
        .unwrap();

        let report = check_integrity(&*db).unwrap();
        assert!(!report.is_consistent());
        assert_eq!(report.orphaned.len(), 2);
        assert!(report.orphaned.contains(&OrphanedRow {
            relation: "post".to_string(),
            id: 50,
            field: "user_id".to_string(),
            value: 777,
            target: "user".to_string(),
        }));
        assert!(report.orphaned.iter().any(|o| o.relation == "follower" && o.value == 888));
    }

    #[test]
    fn test_check_integrity_finds_invalid_media_type() {
        let db = seeded_db();
        run_query(
            &*db,
            &CozoCompiler::compile_put(&MEDIA),
            params([
                ("id", int_value(70)),
                ("type", str_value("gif")),
                ("url", str_value("https://cdn.example.com/x.gif")),
                ("post_id", int_value(1)),
            ]),
        )
        .unwrap();

        let report = check_integrity(&*db).unwrap();
        assert_eq!(
            report.invalid_values,
            vec![InvalidValue {
                relation: "media".to_string(),
                id: 70,
                field: "type".to_string(),
                value: "gif".to_string(),
            }]
        );
    }

    #[test]
    fn test_check_integrity_reports_duplicate_and_self_follows() {
        let db = migrated_db();
        let a = users::insert_user(&*db, NewUser::new("a", "a@example.com")).unwrap();
        let b = users::insert_user(&*db, NewUser::new("b", "b@example.com")).unwrap();
        let first = followers::follow(&*db, a.id, b.id).unwrap();
        let second = followers::follow(&*db, a.id, b.id).unwrap();
        let own = followers::follow(&*db, a.id, a.id).unwrap();

        let report = check_integrity(&*db).unwrap();
        assert!(report.is_consistent());
        assert!(!report.is_clean());
        assert_eq!(
            report.duplicate_follows,
            vec![DuplicateFollow {
                user_from_id: a.id,
                user_to_id: b.id,
                follower_ids: vec![first.id, second.id],
            }]
        );
        assert_eq!(report.self_follows, vec![own]);
    }
}

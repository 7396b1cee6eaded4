//! Follow edges between users.
//!
//! Duplicate pairs and self-follows are accepted on insert; `check_integrity`
//! reports them.

use std::error::Error;

use cozo::DataValue;
use tracing::debug;

use super::{delete_row, fetch_all, fetch_by_id, insert_row, resolve_id, FromRow, RowReader, StoreError};
use crate::db::schema::{SchemaRelation, FOLLOWER};
use crate::db::{int_value, params, DatabaseBackend};
use crate::types::{Follower, NewFollower};

impl FromRow for Follower {
    const RELATION: &'static SchemaRelation = &FOLLOWER;

    fn from_row(row: &[DataValue]) -> Result<Self, StoreError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Follower {
            id: r.i64("id")?,
            user_from_id: r.i64("user_from_id")?,
            user_to_id: r.i64("user_to_id")?,
        })
    }
}

/// Record that `user_from_id` follows `user_to_id`.
pub fn follow(db: &dyn DatabaseBackend, user_from_id: i64, user_to_id: i64) -> Result<Follower, Box<dyn Error>> {
    insert_follower(
        db,
        NewFollower {
            id: None,
            user_from_id,
            user_to_id,
        },
    )
}

pub fn insert_follower(db: &dyn DatabaseBackend, edge: NewFollower) -> Result<Follower, Box<dyn Error>> {
    let id = resolve_id(db, &FOLLOWER, edge.id)?;
    insert_row(
        db,
        &FOLLOWER,
        params([
            ("id", int_value(id)),
            ("user_from_id", int_value(edge.user_from_id)),
            ("user_to_id", int_value(edge.user_to_id)),
        ]),
    )?;
    debug!(id, from = edge.user_from_id, to = edge.user_to_id, "follow recorded");

    Ok(Follower {
        id,
        user_from_id: edge.user_from_id,
        user_to_id: edge.user_to_id,
    })
}

pub fn get_follower(db: &dyn DatabaseBackend, id: i64) -> Result<Option<Follower>, Box<dyn Error>> {
    fetch_by_id(db, id)
}

pub fn list_followers(db: &dyn DatabaseBackend) -> Result<Vec<Follower>, Box<dyn Error>> {
    fetch_all(db)
}

/// Remove one follow edge by id.
pub fn unfollow(db: &dyn DatabaseBackend, id: i64) -> Result<(), Box<dyn Error>> {
    delete_row(db, &FOLLOWER, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{as_store_error, users};
    use crate::test_utils::migrated_db;
    use crate::types::NewUser;

    #[test]
    fn test_follow_requires_existing_users() {
        let db = migrated_db();
        let a = users::insert_user(&*db, NewUser::new("a", "a@example.com")).unwrap();

        let err = follow(&*db, a.id, 99).unwrap_err();
        assert_eq!(
            as_store_error(err.as_ref()),
            Some(&StoreError::ForeignKeyViolation {
                relation: "follower".to_string(),
                field: "user_to_id".to_string(),
                value: 99,
                target: "user".to_string(),
            })
        );

        let err = follow(&*db, 98, a.id).unwrap_err();
        assert!(matches!(
            as_store_error(err.as_ref()),
            Some(StoreError::ForeignKeyViolation { field, .. }) if field == "user_from_id"
        ));
        assert!(list_followers(&*db).unwrap().is_empty());
    }

    #[test]
    fn test_follow_round_trip() {
        let db = migrated_db();
        let a = users::insert_user(&*db, NewUser::new("a", "a@example.com")).unwrap();
        let b = users::insert_user(&*db, NewUser::new("b", "b@example.com")).unwrap();

        let edge = follow(&*db, a.id, b.id).unwrap();
        assert_eq!(get_follower(&*db, edge.id).unwrap(), Some(edge));
    }

    #[test]
    fn test_self_follow_is_accepted() {
        let db = migrated_db();
        let a = users::insert_user(&*db, NewUser::new("a", "a@example.com")).unwrap();
        let edge = follow(&*db, a.id, a.id).unwrap();
        assert_eq!(edge.user_from_id, edge.user_to_id);
    }

    #[test]
    fn test_unfollow_releases_user() {
        let db = migrated_db();
        let a = users::insert_user(&*db, NewUser::new("a", "a@example.com")).unwrap();
        let b = users::insert_user(&*db, NewUser::new("b", "b@example.com")).unwrap();
        let edge = follow(&*db, a.id, b.id).unwrap();

        assert!(users::delete_user(&*db, b.id).is_err());
        unfollow(&*db, edge.id).unwrap();
        users::delete_user(&*db, b.id).unwrap();
        assert!(users::following_of(&*db, a.id).unwrap().is_empty());
    }
}

//! User rows and the accessors that start from a user.

use std::error::Error;

use cozo::DataValue;

use super::{decode_rows, delete_row, fetch_all, fetch_by_id, fetch_where, insert_row, resolve_id, FromRow, RowReader, StoreError};
use crate::db::schema::{SchemaRelation, USER};
use crate::db::{int_value, opt_str_value, params, run_query, str_value, DatabaseBackend};
use crate::types::{Comment, Follower, NewUser, Post, User};

impl FromRow for User {
    const RELATION: &'static SchemaRelation = &USER;

    fn from_row(row: &[DataValue]) -> Result<Self, StoreError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(User {
            id: r.i64("id")?,
            username: r.string("username")?,
            firstname: r.opt_string("firstname")?,
            lastname: r.opt_string("lastname")?,
            email: r.string("email")?,
        })
    }
}

/// Insert a user and return the stored row.
pub fn insert_user(db: &dyn DatabaseBackend, user: NewUser) -> Result<User, Box<dyn Error>> {
    let id = resolve_id(db, &USER, user.id)?;
    let values = params([
        ("id", int_value(id)),
        ("username", str_value(&user.username)),
        ("firstname", opt_str_value(user.firstname.as_deref())),
        ("lastname", opt_str_value(user.lastname.as_deref())),
        ("email", str_value(&user.email)),
    ]);
    insert_row(db, &USER, values)?;

    Ok(User {
        id,
        username: user.username,
        firstname: user.firstname,
        lastname: user.lastname,
        email: user.email,
    })
}

pub fn get_user(db: &dyn DatabaseBackend, id: i64) -> Result<Option<User>, Box<dyn Error>> {
    fetch_by_id(db, id)
}

pub fn list_users(db: &dyn DatabaseBackend) -> Result<Vec<User>, Box<dyn Error>> {
    fetch_all(db)
}

/// Delete a user. Fails while the user still owns posts, comments or follow edges.
pub fn delete_user(db: &dyn DatabaseBackend, id: i64) -> Result<(), Box<dyn Error>> {
    delete_row(db, &USER, id)
}

/// Users that follow `user_id` (the `followers` accessor).
///
/// Each follower appears once even when the edge was recorded twice.
pub fn followers_of(db: &dyn DatabaseBackend, user_id: i64) -> Result<Vec<User>, Box<dyn Error>> {
    users_across_follow(db, "user_to_id", "user_from_id", user_id)
}

/// Users that `user_id` follows (the `following` accessor).
pub fn following_of(db: &dyn DatabaseBackend, user_id: i64) -> Result<Vec<User>, Box<dyn Error>> {
    users_across_follow(db, "user_from_id", "user_to_id", user_id)
}

/// Join follower edges whose `anchor` column is `user_id` to the users on the
/// `other` end.
fn users_across_follow(
    db: &dyn DatabaseBackend,
    anchor: &str,
    other: &str,
    user_id: i64,
) -> Result<Vec<User>, Box<dyn Error>> {
    let script = format!(
        "?[id, username, firstname, lastname, email] := \
         *follower{{{other}: id, {anchor}: anchor}}, anchor = $value, \
         *user{{id, username, firstname, lastname, email}}\n:order id"
    );
    let result = run_query(db, &script, params([("value", int_value(user_id))]))?;
    decode_rows(&result.rows)
}

/// Follow edges pointing at `user_id`.
pub fn follower_edges_of(db: &dyn DatabaseBackend, user_id: i64) -> Result<Vec<Follower>, Box<dyn Error>> {
    fetch_where(db, "user_to_id", int_value(user_id))
}

/// Posts owned by `user_id` (the `posts` accessor).
pub fn posts_of(db: &dyn DatabaseBackend, user_id: i64) -> Result<Vec<Post>, Box<dyn Error>> {
    fetch_where(db, "user_id", int_value(user_id))
}

/// Comments authored by `user_id` (the `comments` accessor).
pub fn comments_by(db: &dyn DatabaseBackend, user_id: i64) -> Result<Vec<Comment>, Box<dyn Error>> {
    fetch_where(db, "author_id", int_value(user_id))
}

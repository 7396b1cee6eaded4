//! Comments written by users on posts.

use std::error::Error;

use cozo::DataValue;

use super::{delete_row, fetch_all, fetch_by_id, insert_row, resolve_id, FromRow, RowReader, StoreError};
use crate::db::schema::{SchemaRelation, COMMENT};
use crate::db::{int_value, params, str_value, DatabaseBackend};
use crate::types::{Comment, NewComment, Post, User};

impl FromRow for Comment {
    const RELATION: &'static SchemaRelation = &COMMENT;

    fn from_row(row: &[DataValue]) -> Result<Self, StoreError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Comment {
            id: r.i64("id")?,
            comment_text: r.string("comment_text")?,
            author_id: r.i64("author_id")?,
            post_id: r.i64("post_id")?,
        })
    }
}

pub fn insert_comment(db: &dyn DatabaseBackend, comment: NewComment) -> Result<Comment, Box<dyn Error>> {
    let id = resolve_id(db, &COMMENT, comment.id)?;
    insert_row(
        db,
        &COMMENT,
        params([
            ("id", int_value(id)),
            ("comment_text", str_value(&comment.comment_text)),
            ("author_id", int_value(comment.author_id)),
            ("post_id", int_value(comment.post_id)),
        ]),
    )?;

    Ok(Comment {
        id,
        comment_text: comment.comment_text,
        author_id: comment.author_id,
        post_id: comment.post_id,
    })
}

pub fn get_comment(db: &dyn DatabaseBackend, id: i64) -> Result<Option<Comment>, Box<dyn Error>> {
    fetch_by_id(db, id)
}

pub fn list_comments(db: &dyn DatabaseBackend) -> Result<Vec<Comment>, Box<dyn Error>> {
    fetch_all(db)
}

pub fn delete_comment(db: &dyn DatabaseBackend, id: i64) -> Result<(), Box<dyn Error>> {
    delete_row(db, &COMMENT, id)
}

fn dangling(field: &str, value: i64, target: &str) -> Box<dyn Error> {
    StoreError::ForeignKeyViolation {
        relation: COMMENT.name.to_string(),
        field: field.to_string(),
        value,
        target: target.to_string(),
    }
    .into()
}

/// The user who wrote a comment (the `author` accessor).
pub fn comment_author(db: &dyn DatabaseBackend, comment: &Comment) -> Result<User, Box<dyn Error>> {
    fetch_by_id(db, comment.author_id)?.ok_or_else(|| dangling("author_id", comment.author_id, "user"))
}

/// The post a comment belongs to (the `post` accessor).
pub fn comment_post(db: &dyn DatabaseBackend, comment: &Comment) -> Result<Post, Box<dyn Error>> {
    fetch_by_id(db, comment.post_id)?.ok_or_else(|| dangling("post_id", comment.post_id, "post"))
}

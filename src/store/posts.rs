//! Posts and the accessors that start from a post.

use std::error::Error;

use cozo::DataValue;

use super::{delete_row, fetch_all, fetch_by_id, fetch_where, insert_row, resolve_id, FromRow, RowReader, StoreError};
use crate::db::schema::{SchemaRelation, POST};
use crate::db::{int_value, params, DatabaseBackend};
use crate::types::{Comment, Media, NewPost, Post, User};

impl FromRow for Post {
    const RELATION: &'static SchemaRelation = &POST;

    fn from_row(row: &[DataValue]) -> Result<Self, StoreError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Post {
            id: r.i64("id")?,
            user_id: r.i64("user_id")?,
        })
    }
}

pub fn insert_post(db: &dyn DatabaseBackend, post: NewPost) -> Result<Post, Box<dyn Error>> {
    let id = resolve_id(db, &POST, post.id)?;
    insert_row(
        db,
        &POST,
        params([("id", int_value(id)), ("user_id", int_value(post.user_id))]),
    )?;
    Ok(Post {
        id,
        user_id: post.user_id,
    })
}

pub fn get_post(db: &dyn DatabaseBackend, id: i64) -> Result<Option<Post>, Box<dyn Error>> {
    fetch_by_id(db, id)
}

pub fn list_posts(db: &dyn DatabaseBackend) -> Result<Vec<Post>, Box<dyn Error>> {
    fetch_all(db)
}

/// Delete a post. Fails while comments or media still belong to it.
pub fn delete_post(db: &dyn DatabaseBackend, id: i64) -> Result<(), Box<dyn Error>> {
    delete_row(db, &POST, id)
}

/// The user owning a post (the `user` accessor).
pub fn post_owner(db: &dyn DatabaseBackend, post: &Post) -> Result<User, Box<dyn Error>> {
    fetch_by_id(db, post.user_id)?.ok_or_else(|| {
        StoreError::ForeignKeyViolation {
            relation: "post".to_string(),
            field: "user_id".to_string(),
            value: post.user_id,
            target: "user".to_string(),
        }
        .into()
    })
}

/// Comments on a post (the `comments` accessor).
pub fn comments_on(db: &dyn DatabaseBackend, post_id: i64) -> Result<Vec<Comment>, Box<dyn Error>> {
    fetch_where(db, "post_id", int_value(post_id))
}

/// Media attached to a post (the `media` accessor).
pub fn media_of(db: &dyn DatabaseBackend, post_id: i64) -> Result<Vec<Media>, Box<dyn Error>> {
    fetch_where(db, "post_id", int_value(post_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{as_store_error, users};
    use crate::test_utils::{migrated_db, seeded_db};
    use crate::types::{MediaType, NewUser};

    #[test]
    fn test_post_requires_owner() {
        let db = migrated_db();
        let err = insert_post(&*db, NewPost { id: None, user_id: 1 }).unwrap_err();
        assert!(matches!(
            as_store_error(err.as_ref()),
            Some(StoreError::ForeignKeyViolation { target, .. }) if target == "user"
        ));
    }

    #[test]
    fn test_post_owner_round_trip() {
        let db = migrated_db();
        let user = users::insert_user(&*db, NewUser::new("a", "a@example.com")).unwrap();
        let post = insert_post(&*db, NewPost { id: Some(10), user_id: user.id }).unwrap();

        let read = get_post(&*db, 10).unwrap().unwrap();
        assert_eq!(read, post);
        assert_eq!(post_owner(&*db, &read).unwrap(), user);
    }

    #[test]
    fn test_seeded_post_children() {
        let db = seeded_db();
        let comments = comments_on(&*db, 1).unwrap();
        assert_eq!(comments.len(), 2);
        assert!(comments.iter().all(|c| c.post_id == 1));

        let media = media_of(&*db, 1).unwrap();
        let kinds: Vec<_> = media.iter().map(|m| m.media_type).collect();
        assert_eq!(kinds, vec![MediaType::Image, MediaType::Video]);

        assert!(media_of(&*db, 2).unwrap().is_empty());
        assert_eq!(list_posts(&*db).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_post_with_children_is_restricted() {
        let db = seeded_db();
        let err = delete_post(&*db, 1).unwrap_err();
        assert!(matches!(as_store_error(err.as_ref()), Some(StoreError::StillReferenced { .. })));
    }
}

//! Media items attached to posts.

use std::error::Error;

use cozo::DataValue;

use super::{delete_row, fetch_all, fetch_by_id, insert_row, resolve_id, FromRow, RowReader, StoreError};
use crate::db::schema::{SchemaRelation, MEDIA};
use crate::db::{int_value, params, str_value, DatabaseBackend};
use crate::types::{Media, MediaType, NewMedia};

impl FromRow for Media {
    const RELATION: &'static SchemaRelation = &MEDIA;

    fn from_row(row: &[DataValue]) -> Result<Self, StoreError> {
        let r = RowReader::new(Self::RELATION, row)?;
        let raw_type = r.string("type")?;
        let media_type = raw_type.parse::<MediaType>().map_err(|e| StoreError::InvalidEnumValue {
            relation: MEDIA.name.to_string(),
            field: "type".to_string(),
            value: e.0,
            allowed: crate::db::schema::MEDIA_TYPES.join(", "),
        })?;

        Ok(Media {
            id: r.i64("id")?,
            media_type,
            url: r.string("url")?,
            post_id: r.i64("post_id")?,
        })
    }
}

pub fn insert_media(db: &dyn DatabaseBackend, media: NewMedia) -> Result<Media, Box<dyn Error>> {
    let id = resolve_id(db, &MEDIA, media.id)?;
    insert_row(
        db,
        &MEDIA,
        params([
            ("id", int_value(id)),
            ("type", str_value(media.media_type.as_str())),
            ("url", str_value(&media.url)),
            ("post_id", int_value(media.post_id)),
        ]),
    )?;

    Ok(Media {
        id,
        media_type: media.media_type,
        url: media.url,
        post_id: media.post_id,
    })
}

pub fn get_media(db: &dyn DatabaseBackend, id: i64) -> Result<Option<Media>, Box<dyn Error>> {
    fetch_by_id(db, id)
}

pub fn list_media(db: &dyn DatabaseBackend) -> Result<Vec<Media>, Box<dyn Error>> {
    fetch_all(db)
}

pub fn delete_media(db: &dyn DatabaseBackend, id: i64) -> Result<(), Box<dyn Error>> {
    delete_row(db, &MEDIA, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_query;
    use crate::db::schema::compilers::CozoCompiler;
    use crate::store::{as_store_error, posts};
    use crate::test_utils::seeded_db;

    fn video(post_id: i64) -> NewMedia {
        NewMedia {
            id: None,
            media_type: MediaType::Video,
            url: "https://cdn.example.com/clip.mp4".to_string(),
            post_id,
        }
    }

    #[test]
    fn test_insert_media_round_trip() {
        let db = seeded_db();
        let stored = insert_media(&*db, video(2)).unwrap();
        assert_eq!(get_media(&*db, stored.id).unwrap(), Some(stored.clone()));
        assert_eq!(posts::media_of(&*db, 2).unwrap(), vec![stored]);
    }

    #[test]
    fn test_media_requires_post() {
        let db = seeded_db();
        let err = insert_media(&*db, video(404)).unwrap_err();
        assert!(matches!(
            as_store_error(err.as_ref()),
            Some(StoreError::ForeignKeyViolation { target, value: 404, .. }) if target == "post"
        ));
    }

    #[test]
    fn test_decode_rejects_stored_unknown_type() {
        let db = seeded_db();
        run_query(
            &*db,
            &CozoCompiler::compile_put(&MEDIA),
            params([
                ("id", int_value(80)),
                ("type", str_value("audio")),
                ("url", str_value("https://cdn.example.com/a.mp3")),
                ("post_id", int_value(1)),
            ]),
        )
        .unwrap();

        let err = get_media(&*db, 80).unwrap_err();
        assert!(matches!(
            as_store_error(err.as_ref()),
            Some(StoreError::InvalidEnumValue { value, .. }) if value == "audio"
        ));
    }

    #[test]
    fn test_delete_media_frees_post() {
        let db = seeded_db();
        let post = posts::insert_post(&*db, crate::types::NewPost { id: None, user_id: 1 }).unwrap();
        let item = insert_media(&*db, video(post.id)).unwrap();

        assert!(posts::delete_post(&*db, post.id).is_err());
        delete_media(&*db, item.id).unwrap();
        posts::delete_post(&*db, post.id).unwrap();
    }
}

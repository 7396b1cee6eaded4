//! Bulk loading of a JSON dataset.
//!
//! Sections are loaded parent-first (users, followers, posts, media,
//! comments) and every row goes through the same validation as a single
//! insert, so a dataset may reference rows defined earlier in the same file.

use std::error::Error;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::{comments, followers, media, posts, users, StoreError};
use crate::db::schema::{ALL_RELATIONS, MEDIA, MEDIA_TYPES};
use crate::db::DatabaseBackend;
use crate::types::{MediaType, NewComment, NewFollower, NewMedia, NewPost, NewUser};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read dataset file '{path}': {message}")]
    FileReadFailed { path: String, message: String },

    #[error("Failed to parse dataset JSON: {message}")]
    JsonParseFailed { message: String },

    #[error("Failed to clear data: {message}")]
    ClearFailed { message: String },

    #[error("Failed to import {section} entry {index}: {message}")]
    RowRejected {
        section: String,
        index: usize,
        message: String,
    },
}

/// Media entry as it appears in a dataset file. The type stays a string
/// until import so an unknown value is reported as a constraint failure.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    pub post_id: i64,
}

/// Contents of a dataset file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<NewUser>,
    #[serde(default)]
    pub followers: Vec<NewFollower>,
    #[serde(default)]
    pub posts: Vec<NewPost>,
    #[serde(default)]
    pub media: Vec<MediaEntry>,
    #[serde(default)]
    pub comments: Vec<NewComment>,
}

impl Dataset {
    pub fn from_json(content: &str) -> Result<Self, ImportError> {
        serde_json::from_str(content).map_err(|e| ImportError::JsonParseFailed {
            message: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ImportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ImportError::FileReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}

/// Result of an import
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    pub cleared: bool,
    pub users_imported: usize,
    pub followers_imported: usize,
    pub posts_imported: usize,
    pub media_imported: usize,
    pub comments_imported: usize,
}

impl ImportResult {
    pub fn total(&self) -> usize {
        self.users_imported
            + self.followers_imported
            + self.posts_imported
            + self.media_imported
            + self.comments_imported
    }
}

/// Remove every row from every relation, children first.
pub fn clear_all(db: &dyn DatabaseBackend) -> Result<(), Box<dyn Error>> {
    for relation in ALL_RELATIONS.iter().rev() {
        db.clear_relation(relation).map_err(|e| ImportError::ClearFailed {
            message: format!("Failed to clear {}: {}", relation.name, e),
        })?;
    }
    Ok(())
}

fn rejected(section: &str, index: usize, err: Box<dyn Error>) -> ImportError {
    ImportError::RowRejected {
        section: section.to_string(),
        index,
        message: err.to_string(),
    }
}

fn parse_media_type(entry: &MediaEntry) -> Result<MediaType, Box<dyn Error>> {
    entry.media_type.parse::<MediaType>().map_err(|e| {
        StoreError::InvalidEnumValue {
            relation: MEDIA.name.to_string(),
            field: "type".to_string(),
            value: e.0,
            allowed: MEDIA_TYPES.join(", "),
        }
        .into()
    })
}

/// Load a dataset. Stops at the first rejected row; rows written before it
/// stay stored.
pub fn import_dataset(db: &dyn DatabaseBackend, dataset: Dataset) -> Result<ImportResult, Box<dyn Error>> {
    let mut result = ImportResult::default();

    for (index, user) in dataset.users.into_iter().enumerate() {
        users::insert_user(db, user).map_err(|e| rejected("users", index, e))?;
        result.users_imported += 1;
    }

    for (index, edge) in dataset.followers.into_iter().enumerate() {
        followers::insert_follower(db, edge).map_err(|e| rejected("followers", index, e))?;
        result.followers_imported += 1;
    }

    for (index, post) in dataset.posts.into_iter().enumerate() {
        posts::insert_post(db, post).map_err(|e| rejected("posts", index, e))?;
        result.posts_imported += 1;
    }

    for (index, entry) in dataset.media.into_iter().enumerate() {
        let media_type = parse_media_type(&entry).map_err(|e| rejected("media", index, e))?;
        let item = NewMedia {
            id: entry.id,
            media_type,
            url: entry.url,
            post_id: entry.post_id,
        };
        media::insert_media(db, item).map_err(|e| rejected("media", index, e))?;
        result.media_imported += 1;
    }

    for (index, comment) in dataset.comments.into_iter().enumerate() {
        comments::insert_comment(db, comment).map_err(|e| rejected("comments", index, e))?;
        result.comments_imported += 1;
    }

    info!(rows = result.total(), "dataset imported");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{migrated_db, seeded_db, SEED_JSON};

    #[test]
    fn test_seed_counts() {
        let db = migrated_db();
        let dataset = Dataset::from_json(SEED_JSON).unwrap();
        let result = import_dataset(&*db, dataset).unwrap();
        assert_eq!(
            result,
            ImportResult {
                cleared: false,
                users_imported: 3,
                followers_imported: 3,
                posts_imported: 2,
                media_imported: 2,
                comments_imported: 3,
            }
        );
    }

    #[test]
    fn test_empty_dataset() {
        let db = migrated_db();
        let result = import_dataset(&*db, Dataset::from_json("{}").unwrap()).unwrap();
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Dataset::from_json("{ not json }"),
            Err(ImportError::JsonParseFailed { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Dataset::from_file(Path::new("/nonexistent/dataset.json")),
            Err(ImportError::FileReadFailed { .. })
        ));
    }

    #[test]
    fn test_unknown_media_type_is_rejected() {
        let db = seeded_db();
        let dataset = Dataset::from_json(
            r#"{"media": [{"type": "audio", "url": "https://cdn.example.com/a.mp3", "post_id": 1}]}"#,
        )
        .unwrap();
        let err = import_dataset(&*db, dataset).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("media entry 0"), "{}", message);
        assert!(message.contains("audio"), "{}", message);
    }

    #[test]
    fn test_dangling_reference_stops_import() {
        let db = migrated_db();
        let dataset = Dataset::from_json(
            r#"{
                "users": [{"username": "a", "email": "a@example.com"}],
                "posts": [{"user_id": 1}, {"user_id": 9}]
            }"#,
        )
        .unwrap();
        let err = import_dataset(&*db, dataset).unwrap_err();
        assert!(err.to_string().contains("posts entry 1"));
        assert_eq!(posts::list_posts(&*db).unwrap().len(), 1);
    }

    #[test]
    fn test_clear_all_empties_every_relation() {
        let db = seeded_db();
        clear_all(&*db).unwrap();
        assert!(users::list_users(&*db).unwrap().is_empty());
        assert!(followers::list_followers(&*db).unwrap().is_empty());
        assert!(comments::list_comments(&*db).unwrap().is_empty());
        assert!(media::list_media(&*db).unwrap().is_empty());
    }
}

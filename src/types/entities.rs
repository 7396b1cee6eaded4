//! Row types for the five entities and the inputs used to create them.
//!
//! Rows hold foreign-key values, never references to other rows. Navigation
//! (`user.posts`, `post.media`, ...) is done by the store with a lookup.

use serde::{Deserialize, Serialize};

use super::MediaType;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    pub email: String,
}

impl User {
    /// "First Last", falling back to the username when both names are missing.
    pub fn display_name(&self) -> String {
        match (&self.firstname, &self.lastname) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.username.clone(),
        }
    }
}

/// A stored follow edge: `user_from_id` follows `user_to_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follower {
    pub id: i64,
    pub user_from_id: i64,
    pub user_to_id: i64,
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
}

/// A stored media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: i64,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub url: String,
    pub post_id: i64,
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub comment_text: String,
    pub author_id: i64,
    pub post_id: i64,
}

/// Input for a new user. `id` is assigned when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_names(mut self, firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        self.firstname = Some(firstname.into());
        self.lastname = Some(lastname.into());
        self
    }
}

/// Input for a new follow edge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewFollower {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_from_id: i64,
    pub user_to_id: i64,
}

/// Input for a new post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
}

/// Input for a new media item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub id: Option<i64>,
    pub media_type: MediaType,
    pub url: String,
    pub post_id: i64,
}

/// Input for a new comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub id: Option<i64>,
    pub comment_text: String,
    pub author_id: i64,
    pub post_id: i64,
}

use std::error::Error;

use serde::Serialize;

use super::PostCmd;
use crate::commands::Execute;
use crate::db::DatabaseBackend;
use crate::store::{posts, StoreError};
use crate::types::{Comment, Media, Post, User};

/// A post with its owner and children
#[derive(Debug, Clone, Serialize)]
pub struct PostResult {
    pub post: Post,
    pub owner: User,
    pub media: Vec<Media>,
    pub comments: Vec<Comment>,
}

impl Execute for PostCmd {
    type Output = PostResult;

    fn execute(self, db: &dyn DatabaseBackend) -> Result<Self::Output, Box<dyn Error>> {
        let post = posts::get_post(db, self.id)?.ok_or(StoreError::NotFound {
            relation: "post".to_string(),
            id: self.id,
        })?;

        Ok(PostResult {
            owner: posts::post_owner(db, &post)?,
            media: posts::media_of(db, post.id)?,
            comments: posts::comments_on(db, post.id)?,
            post,
        })
    }
}

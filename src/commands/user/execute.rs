use std::error::Error;

use serde::Serialize;

use super::UserCmd;
use crate::commands::Execute;
use crate::db::DatabaseBackend;
use crate::store::{users, StoreError};
use crate::types::{Comment, Post, User};

/// A user and everything reachable from it in one hop
#[derive(Debug, Clone, Serialize)]
pub struct UserResult {
    pub user: User,
    pub followers: Vec<User>,
    pub following: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

impl Execute for UserCmd {
    type Output = UserResult;

    fn execute(self, db: &dyn DatabaseBackend) -> Result<Self::Output, Box<dyn Error>> {
        let user = users::get_user(db, self.id)?.ok_or(StoreError::NotFound {
            relation: "user".to_string(),
            id: self.id,
        })?;

        Ok(UserResult {
            followers: users::followers_of(db, user.id)?,
            following: users::following_of(db, user.id)?,
            posts: users::posts_of(db, user.id)?,
            comments: users::comments_by(db, user.id)?,
            user,
        })
    }
}

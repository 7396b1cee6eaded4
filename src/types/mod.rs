//! Shared types for the social schema entities.

mod entities;
mod media_type;

pub use entities::{
    Comment, Follower, Media, NewComment, NewFollower, NewMedia, NewPost, NewUser, Post, User,
};
pub use media_type::{MediaType, ParseMediaTypeError};

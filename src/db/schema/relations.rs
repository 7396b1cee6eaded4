//! All database relation definitions.
//!
//! This module defines the 5 relations that form the social schema:
//! user, follower, post, media and comment.

use super::definition::{
    DataType, ForeignKey, RelationshipKind, SchemaField, SchemaRelation, SchemaRelationship,
};

/// Length bound shared by every string column.
pub const MAX_STRING_LEN: usize = 250;

/// Accepted values of `media.type`.
pub const MEDIA_TYPES: &[&str] = &["image", "video"];

const fn id_field() -> SchemaField {
    SchemaField {
        name: "id",
        data_type: DataType::Int,
        nullable: false,
        max_len: None,
        allowed_values: &[],
        references: None,
    }
}

const fn string_field(name: &'static str, nullable: bool) -> SchemaField {
    SchemaField {
        name,
        data_type: DataType::String,
        nullable,
        max_len: Some(MAX_STRING_LEN),
        allowed_values: &[],
        references: None,
    }
}

const fn foreign_key(name: &'static str, relation: &'static str) -> SchemaField {
    SchemaField {
        name,
        data_type: DataType::Int,
        nullable: false,
        max_len: None,
        allowed_values: &[],
        references: Some(ForeignKey { relation, field: "id" }),
    }
}

/// User relation: account identity
///
/// Key fields: id
/// Value fields: username, firstname, lastname, email
pub const USER: SchemaRelation = SchemaRelation {
    name: "user",
    entity: "User",
    key_fields: &[id_field()],
    value_fields: &[
        string_field("username", false),
        string_field("firstname", true),
        string_field("lastname", true),
        string_field("email", false),
    ],
    relationships: &[
        SchemaRelationship {
            name: "followers",
            target: "follower",
            kind: RelationshipKind::OneToMany,
            foreign_key: "user_to_id",
            back_populates: None,
        },
        SchemaRelationship {
            name: "following",
            target: "follower",
            kind: RelationshipKind::OneToMany,
            foreign_key: "user_from_id",
            back_populates: None,
        },
        SchemaRelationship {
            name: "posts",
            target: "post",
            kind: RelationshipKind::OneToMany,
            foreign_key: "user_id",
            back_populates: Some("user"),
        },
        SchemaRelationship {
            name: "comments",
            target: "comment",
            kind: RelationshipKind::OneToMany,
            foreign_key: "author_id",
            back_populates: Some("author"),
        },
    ],
};

/// Follower relation: directed edge, `user_from` follows `user_to`
///
/// Key fields: id
/// Value fields: user_from_id, user_to_id
pub const FOLLOWER: SchemaRelation = SchemaRelation {
    name: "follower",
    entity: "Follower",
    key_fields: &[id_field()],
    value_fields: &[
        foreign_key("user_from_id", "user"),
        foreign_key("user_to_id", "user"),
    ],
    relationships: &[],
};

/// Post relation: owned by one user
///
/// Key fields: id
/// Value fields: user_id
pub const POST: SchemaRelation = SchemaRelation {
    name: "post",
    entity: "Post",
    key_fields: &[id_field()],
    value_fields: &[foreign_key("user_id", "user")],
    relationships: &[
        SchemaRelationship {
            name: "user",
            target: "user",
            kind: RelationshipKind::ManyToOne,
            foreign_key: "user_id",
            back_populates: Some("posts"),
        },
        SchemaRelationship {
            name: "comments",
            target: "comment",
            kind: RelationshipKind::OneToMany,
            foreign_key: "post_id",
            back_populates: Some("post"),
        },
        // Unidirectional: media rows cannot navigate back to their post.
        SchemaRelationship {
            name: "media",
            target: "media",
            kind: RelationshipKind::OneToMany,
            foreign_key: "post_id",
            back_populates: None,
        },
    ],
};

/// Media relation: an image or video attached to a post
///
/// Key fields: id
/// Value fields: type, url, post_id
pub const MEDIA: SchemaRelation = SchemaRelation {
    name: "media",
    entity: "Media",
    key_fields: &[id_field()],
    value_fields: &[
        SchemaField {
            name: "type",
            data_type: DataType::String,
            nullable: false,
            max_len: None,
            allowed_values: MEDIA_TYPES,
            references: None,
        },
        string_field("url", false),
        foreign_key("post_id", "post"),
    ],
    relationships: &[],
};

/// Comment relation: text written by a user on a post
///
/// Key fields: id
/// Value fields: comment_text, author_id, post_id
pub const COMMENT: SchemaRelation = SchemaRelation {
    name: "comment",
    entity: "Comment",
    key_fields: &[id_field()],
    value_fields: &[
        string_field("comment_text", false),
        foreign_key("author_id", "user"),
        foreign_key("post_id", "post"),
    ],
    relationships: &[
        SchemaRelationship {
            name: "author",
            target: "user",
            kind: RelationshipKind::ManyToOne,
            foreign_key: "author_id",
            back_populates: Some("comments"),
        },
        SchemaRelationship {
            name: "post",
            target: "post",
            kind: RelationshipKind::ManyToOne,
            foreign_key: "post_id",
            back_populates: Some("comments"),
        },
    ],
};

/// All relations, ordered so that every referenced relation precedes the
/// relations that point at it.
pub const ALL_RELATIONS: &[&SchemaRelation] = &[&USER, &FOLLOWER, &POST, &MEDIA, &COMMENT];

/// Find a relation by name.
pub fn find_relation(name: &str) -> Option<&'static SchemaRelation> {
    ALL_RELATIONS.iter().copied().find(|r| r.name == name)
}

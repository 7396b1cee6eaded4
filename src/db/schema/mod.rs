//! Backend-agnostic database schema definitions.
//!
//! This module is the single source of truth for the social schema. Both the
//! Cozo DDL used to create stored relations and the entity-relationship diagram
//! are generated from it.
//!
//! # Overview
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `DataType` - column data types (String, Int)
//!    - `SchemaField` - a column with nullability, length bound, enumerated values
//!      and optional foreign key
//!    - `SchemaRelation` - a complete relation with key and value fields
//!    - `SchemaRelationship` - a navigable accessor backed by a foreign key
//!
//! 2. **Relation Definitions** (`relations.rs`):
//!    - `USER`, `FOLLOWER`, `POST`, `MEDIA`, `COMMENT`
//!    - `ALL_RELATIONS` - all 5 relations in dependency order
//!
//! 3. **Compilers** (`compilers/`): Cozo DDL and Graphviz DOT.
//!
//! # Type Mapping
//!
//! | Rust Type | Cozo Type | Diagram |
//! |-----------|-----------|---------|
//! | String | String (String? when nullable) | VARCHAR(n) |
//! | Int | Int | INTEGER |

pub mod compilers;
mod definition;
pub mod migrations;
mod relations;

// Re-export public items
pub use definition::{
    DataType, ForeignKey, RelationshipKind, SchemaField, SchemaRelation, SchemaRelationship,
};
pub use relations::{
    find_relation, ALL_RELATIONS, COMMENT, FOLLOWER, MAX_STRING_LEN, MEDIA, MEDIA_TYPES, POST, USER,
};

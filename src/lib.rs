//! social_schema library - a relational social-media schema on CozoDB
//!
//! Defines users, follow edges, posts, media and comments once, compiles that
//! definition to CozoDB relations and to a Graphviz ER diagram, and provides a
//! typed store that enforces the declared constraints.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod diagram;
pub mod output;
pub mod store;
pub mod types;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;

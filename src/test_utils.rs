//! Shared test utilities for store, command and integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::commands::Execute;
use crate::db::schema::migrations::run_migrations;
use crate::db::{open_mem_db, DatabaseBackend};
use crate::store::import::{import_dataset, Dataset};

/// Small social graph used across tests.
///
/// - users: alice(1), bob(2), carol(3)
/// - follows: alice→bob, carol→bob, bob→alice
/// - posts: 1 by alice, 2 by carol
/// - media: an image and a video on post 1
/// - comments: bob and carol on post 1, carol on post 2
pub const SEED_JSON: &str = r#"{
    "users": [
        {"username": "alice", "firstname": "Alice", "lastname": "Liddell", "email": "alice@example.com"},
        {"username": "bob", "email": "bob@example.com"},
        {"username": "carol", "firstname": "Carol", "email": "carol@example.com"}
    ],
    "followers": [
        {"user_from_id": 1, "user_to_id": 2},
        {"user_from_id": 3, "user_to_id": 2},
        {"user_from_id": 2, "user_to_id": 1}
    ],
    "posts": [
        {"user_id": 1},
        {"user_id": 3}
    ],
    "media": [
        {"type": "image", "url": "https://cdn.example.com/p1.png", "post_id": 1},
        {"type": "video", "url": "https://cdn.example.com/p1.mp4", "post_id": 1}
    ],
    "comments": [
        {"comment_text": "Great shot", "author_id": 2, "post_id": 1},
        {"comment_text": "Love it", "author_id": 3, "post_id": 1},
        {"comment_text": "First!", "author_id": 3, "post_id": 2}
    ]
}"#;

/// Create a temporary file containing the given content.
pub fn create_temp_json_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// In-memory database with every relation created and no rows.
pub fn migrated_db() -> Box<dyn DatabaseBackend> {
    let db = open_mem_db();
    run_migrations(&*db).expect("Migrations should succeed");
    db
}

/// In-memory database loaded with `SEED_JSON`.
pub fn seeded_db() -> Box<dyn DatabaseBackend> {
    let db = migrated_db();
    let dataset = Dataset::from_json(SEED_JSON).expect("Seed should parse");
    import_dataset(&*db, dataset).expect("Seed import should succeed");
    db
}

/// Execute a command against a database and return the result.
pub fn execute_cmd<C: Execute>(cmd: C, db: &dyn DatabaseBackend) -> Result<C::Output, Box<dyn std::error::Error>> {
    cmd.execute(db)
}

/// Execute a command against an uninitialized database.
pub fn execute_on_empty_db<C: Execute>(cmd: C) -> Result<C::Output, Box<dyn std::error::Error>> {
    let db = open_mem_db();
    cmd.execute(&*db)
}

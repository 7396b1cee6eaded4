//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` implementation producing a serializable result
//! - An `Outputable` implementation for table output
//! - CLI parsing tests built from the test macros

mod check;
mod diagram;
mod follow;
mod import;
mod post;
mod setup;
mod user;

pub use check::CheckCmd;
pub use diagram::DiagramCmd;
pub use follow::FollowCmd;
pub use import::ImportCmd;
pub use post::PostCmd;
pub use setup::SetupCmd;
pub use user::UserCmd;

use clap::Subcommand;
use std::error::Error;

use crate::config::ConfigFile;
use crate::db::{DatabaseBackend, DatabaseConfig};
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, db: &dyn DatabaseBackend) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the social schema relations (idempotent)
    Setup(SetupCmd),

    /// Render the entity-relationship diagram (diagram.png by default)
    Diagram(DiagramCmd),

    /// Load users, followers, posts, media and comments from a JSON file
    Import(ImportCmd),

    /// Record that one user follows another
    Follow(FollowCmd),

    /// Show a user with followers, following, posts and comments
    User(UserCmd),

    /// Show a post with its owner, media and comments
    Post(PostCmd),

    /// Scan stored rows for integrity problems
    Check(CheckCmd),
}

impl Command {
    /// Execute the command and return formatted output.
    ///
    /// `diagram` only reads the schema and never opens the database.
    pub fn run(self, db: Option<&str>, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        if let Command::Diagram(cmd) = self {
            let config = ConfigFile::load_optional()?.and_then(|c| c.diagram);
            let result = cmd.render(config.as_ref())?;
            return Ok(result.format(format));
        }

        let backend = DatabaseConfig::resolve(db)?.connect()?;
        self.run_with(backend.as_ref(), format)
    }

    /// Execute a database command against an open backend.
    pub fn run_with(self, db: &dyn DatabaseBackend, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Setup(cmd) => Ok(cmd.execute(db)?.format(format)),
            Command::Import(cmd) => Ok(cmd.execute(db)?.format(format)),
            Command::Follow(cmd) => Ok(cmd.execute(db)?.format(format)),
            Command::User(cmd) => Ok(cmd.execute(db)?.format(format)),
            Command::Post(cmd) => Ok(cmd.execute(db)?.format(format)),
            Command::Check(cmd) => Ok(cmd.execute(db)?.format(format)),
            Command::Diagram(cmd) => Ok(cmd.render(None)?.format(format)),
        }
    }
}

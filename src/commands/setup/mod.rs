mod execute;
mod output;

use clap::Args;

pub use execute::{RelationState, SetupResult};

/// Create the database schema without importing data
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  social_schema setup --db ./social.sqlite            # Create schema
  social_schema setup --db ./social.sqlite --dry-run  # Show what would be created")]
pub struct SetupCmd {
    /// Show what would be created without doing it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

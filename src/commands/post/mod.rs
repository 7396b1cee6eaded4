mod execute;
mod output;

use clap::Args;

pub use execute::PostResult;

/// Show a post with its owner, media and comments
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  social_schema post --id 1")]
pub struct PostCmd {
    /// Post id
    #[arg(long)]
    pub id: i64,
}

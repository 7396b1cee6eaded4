mod execute;
mod output;

use clap::Args;

pub use execute::FollowResult;

/// Record that one user follows another
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  social_schema follow --from 1 --to 2   # User 1 follows user 2")]
pub struct FollowCmd {
    /// Id of the following user
    #[arg(long)]
    pub from: i64,

    /// Id of the followed user
    #[arg(long)]
    pub to: i64,
}

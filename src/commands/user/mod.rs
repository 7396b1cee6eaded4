mod execute;
mod output;

use clap::Args;

pub use execute::UserResult;

/// Show a user with followers, following, posts and comments
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  social_schema user --id 1            # Table view
  social_schema user --id 1 -F json    # JSON view")]
pub struct UserCmd {
    /// User id
    #[arg(long)]
    pub id: i64,
}

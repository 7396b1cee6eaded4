mod execute;
mod output;

use clap::Args;

/// Scan stored rows for orphaned foreign keys, invalid media types,
/// duplicate follows and self-follows
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  social_schema check            # Human-readable report
  social_schema check -F json    # Machine-readable report")]
pub struct CheckCmd {}

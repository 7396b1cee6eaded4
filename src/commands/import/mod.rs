mod cli_tests;
mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

fn validate_file_exists(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("File not found: {}", path.display()))
    }
}

/// Load a JSON dataset into the database
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  social_schema import -f data.json           # Append rows
  social_schema import -f data.json --clear   # Replace all rows")]
pub struct ImportCmd {
    /// Path to the dataset JSON file
    #[arg(short, long, value_parser = validate_file_exists)]
    pub file: PathBuf,

    /// Remove all existing rows before importing
    #[arg(long, default_value_t = false)]
    pub clear: bool,
}

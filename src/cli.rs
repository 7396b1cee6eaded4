//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "social_schema", author, version, about, long_about = None)]
pub struct Args {
    /// Database location: a file path, sqlite://path or :memory:.
    /// Falls back to .social_schema.json, DATABASE_URL, COZO_PATH, then ./social.sqlite
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_global_defaults() {
        let args = Args::try_parse_from(["social_schema", "check"]).unwrap();
        assert_eq!(args.db, None);
        assert_eq!(args.format, OutputFormat::Table);
        assert!(!args.verbose);
    }

    #[rstest]
    #[case("table", OutputFormat::Table)]
    #[case("json", OutputFormat::Json)]
    #[case("toon", OutputFormat::Toon)]
    fn test_format_flag(#[case] value: &str, #[case] expected: OutputFormat) {
        let args = Args::try_parse_from(["social_schema", "check", "--format", value]).unwrap();
        assert_eq!(args.format, expected);
    }

    #[rstest]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["social_schema", "user", "--id", "1", "--db", ":memory:", "-v"]).unwrap();
        assert_eq!(args.db.as_deref(), Some(":memory:"));
        assert!(args.verbose);
    }

    #[rstest]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["social_schema", "check", "--format", "xml"]).is_err());
    }
}

//! CLI parsing tests for import command.
//!
//! The file argument is validated for existence, so the positive cases use a
//! temp file fixture.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::{fixture, rstest};
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    #[fixture]
    fn temp_file() -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        File::create(&path).unwrap();
        (dir, path)
    }

    crate::cli_required_arg_test! {
        command: "import",
        test_name: test_requires_file,
        required_arg: "--file",
    }

    #[rstest]
    fn test_file_must_exist() {
        let result = Args::try_parse_from(["social_schema", "import", "--file", "nonexistent_file.json"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("File not found"));
    }

    #[rstest]
    fn test_with_existing_file(temp_file: (TempDir, PathBuf)) {
        let (_dir, path) = temp_file;
        let args = Args::try_parse_from(["social_schema", "import", "--file", path.to_str().unwrap(), "--clear"]).unwrap();
        match args.command {
            crate::commands::Command::Import(cmd) => {
                assert_eq!(cmd.file, path);
                assert!(cmd.clear);
            }
            _ => panic!("Expected Import command"),
        }
    }
}

//! Configuration file handling.
//!
//! This module loads `.social_schema.json` from the current directory. The
//! file is optional; when present it may select the database backend and the
//! diagram defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::db::DatabaseConfig;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".social_schema.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Configuration file not found: {path}\n\n\
         Example:\n\
         {{\n  \
           \"database\": {{ \"type\": \"sqlite\", \"path\": \"./social.sqlite\" }},\n  \
           \"diagram\": {{ \"output\": \"diagram.png\", \"dot_bin\": \"dot\" }}\n\
         }}"
    )]
    NotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: String, message: String },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: Option<DatabaseConfigFile>,

    #[serde(default)]
    pub diagram: Option<DiagramConfig>,
}

/// Database section. JSON uses a `type` tag with lowercase variant names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfigFile {
    /// SQLite backend with file path
    Sqlite { path: PathBuf },
    /// In-memory backend
    #[serde(rename = "memory")]
    Mem,
}

/// Diagram section. Both fields fall back to the CLI defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramConfig {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub dot_bin: Option<String>,
}

impl ConfigFile {
    /// Load `.social_schema.json` from the current directory, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not
    /// valid JSON.
    pub fn load_optional() -> Result<Option<Self>, ConfigError> {
        Self::load_optional_from(Path::new(CONFIG_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn load_optional_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        match Self::load_from(path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl DatabaseConfigFile {
    /// Convert this configuration to a DatabaseConfig.
    pub fn to_database_config(&self) -> DatabaseConfig {
        match self {
            Self::Sqlite { path } => DatabaseConfig::CozoSqlite { path: path.clone() },
            Self::Mem => DatabaseConfig::CozoMem,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_deserialization() {
        let json = r#"
        {
            "database": {
                "type": "sqlite",
                "path": "./social.sqlite"
            }
        }
        "#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.database,
            Some(DatabaseConfigFile::Sqlite { path: PathBuf::from("./social.sqlite") })
        );
        assert!(config.diagram.is_none());
    }

    #[test]
    fn test_memory_deserialization() {
        let json = r#"{ "database": { "type": "memory" } }"#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(config.database, Some(DatabaseConfigFile::Mem));
    }

    #[test]
    fn test_diagram_section() {
        let json = r#"{ "diagram": { "output": "docs/er.svg", "dot_bin": "/opt/graphviz/bin/dot" } }"#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert!(config.database.is_none());
        let diagram = config.diagram.unwrap();
        assert_eq!(diagram.output, Some(PathBuf::from("docs/er.svg")));
        assert_eq!(diagram.dot_bin.as_deref(), Some("/opt/graphviz/bin/dot"));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let json = r#"{ "database": { "type": "postgres" } }"#;
        assert!(serde_json::from_str::<ConfigFile>(json).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert_eq!(ConfigFile::load_optional_from(&path).unwrap(), None);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ invalid json }").unwrap();

        assert!(matches!(ConfigFile::load_from(&path), Err(ConfigError::InvalidJson { .. })));
        assert!(ConfigFile::load_optional_from(&path).is_err());
    }

    #[test]
    fn test_load_valid_sqlite_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "database": { "type": "sqlite", "path": "./social.sqlite" } }"#).unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert!(matches!(config.database, Some(DatabaseConfigFile::Sqlite { .. })));
    }

    #[test]
    fn test_to_database_config() {
        let sqlite = DatabaseConfigFile::Sqlite {
            path: PathBuf::from("/tmp/test.db"),
        };
        assert_eq!(
            sqlite.to_database_config(),
            DatabaseConfig::CozoSqlite { path: PathBuf::from("/tmp/test.db") }
        );
        assert_eq!(DatabaseConfigFile::Mem.to_database_config(), DatabaseConfig::CozoMem);
    }
}

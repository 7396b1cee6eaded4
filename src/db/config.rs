//! Database configuration for runtime backend selection.
//!
//! Supports CozoDB with SQLite storage (default) and in-memory storage.

use std::error::Error;
use std::path::PathBuf;

use tracing::debug;

use super::backend::DatabaseBackend;
use super::connection::CozoBackend;

/// Default database location when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "./social.sqlite";

/// Configuration for database backend selection.
///
/// Built from a CLI argument, the `.social_schema.json` configuration file or
/// environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// Local CozoDB with SQLite storage.
    CozoSqlite { path: PathBuf },

    /// Local CozoDB with in-memory storage.
    CozoMem,
}

impl DatabaseConfig {
    /// Create a backend instance from this configuration.
    pub fn connect(&self) -> Result<Box<dyn DatabaseBackend>, Box<dyn Error>> {
        debug!(config = ?self, "connecting");
        let backend = match self {
            Self::CozoSqlite { path } => CozoBackend::open_sqlite(path)?,
            Self::CozoMem => CozoBackend::open_mem()?,
        };
        Ok(Box::new(backend))
    }

    /// Parse from a connection URL or file path.
    ///
    /// Supported formats:
    /// - `./path/to/db.sqlite` or `/absolute/path` → CozoSqlite
    /// - `sqlite:///path/to/db` → CozoSqlite
    /// - `:memory:` or `mem://` → CozoMem
    pub fn from_url(url: &str) -> Result<Self, Box<dyn Error>> {
        if url == ":memory:" || url == "mem://" {
            return Ok(Self::CozoMem);
        }

        if let Some(path) = url.strip_prefix("sqlite://") {
            if path.is_empty() {
                return Err("sqlite:// URL requires a path".into());
            }
            return Ok(Self::CozoSqlite {
                path: PathBuf::from(path),
            });
        }

        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Err("PostgreSQL backend is not supported".into());
        }

        if url.is_empty() {
            return Err("Empty database URL".into());
        }

        Ok(Self::CozoSqlite {
            path: PathBuf::from(url),
        })
    }

    /// Load from environment variables.
    ///
    /// Checks in order:
    /// 1. DATABASE_URL environment variable
    /// 2. COZO_PATH environment variable
    pub fn from_env() -> Result<Option<Self>, Box<dyn Error>> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            return Ok(Some(Self::from_url(&url)?));
        }

        if let Ok(path) = std::env::var("COZO_PATH") {
            return Ok(Some(Self::CozoSqlite {
                path: PathBuf::from(path),
            }));
        }

        Ok(None)
    }

    /// Resolve configuration.
    ///
    /// Priority: explicit `--db` argument > config file > environment > default
    /// (`./social.sqlite`).
    pub fn resolve(cli_db: Option<&str>) -> Result<Self, Box<dyn Error>> {
        if let Some(url) = cli_db {
            return Self::from_url(url);
        }

        if let Some(config_file) = crate::config::ConfigFile::load_optional()? {
            if let Some(database) = config_file.database {
                return Ok(database.to_database_config());
            }
        }

        if let Some(config) = Self::from_env()? {
            return Ok(config);
        }

        Self::from_url(DEFAULT_DB_PATH)
    }
}

//! Database configuration and environment variable handling.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Data source used when none is configured.
pub const DEFAULT_DATA_SOURCE: &str = "petstore.db";

/// Storage driver and data source, supplied externally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Driver name: `sqlite`/`sqlite3` or `local`/`memory`
    #[serde(default = "default_driver")]
    pub driver: String,
    /// Driver-specific data source (a file path or `:memory:` for SQLite)
    #[serde(default = "default_data_source")]
    pub data_source: String,
    /// Maximum number of pooled connections
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    /// Seconds to wait for a pooled connection
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_sec: u64,
}

fn default_driver() -> String {
    "sqlite".to_string()
}

fn default_data_source() -> String {
    DEFAULT_DATA_SOURCE.to_string()
}

fn default_max_pool_size() -> u32 {
    8
}

fn default_connection_timeout() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            data_source: default_data_source(),
            max_pool_size: default_max_pool_size(),
            connection_timeout_sec: default_connection_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Create a configuration for the given driver and data source.
    pub fn new(driver: impl Into<String>, data_source: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            data_source: data_source.into(),
            ..Default::default()
        }
    }

    /// Configuration for the in-memory local repository.
    pub fn local() -> Self {
        Self::new("local", "")
    }

    /// Configuration for a SQLite database at `data_source`.
    pub fn sqlite(data_source: impl Into<String>) -> Self {
        Self::new("sqlite", data_source)
    }

    /// Apply environment overrides on top of this configuration.
    ///
    /// # Environment Variables
    /// - `PETSTORE_DB_DRIVER`: Driver name
    /// - `PETSTORE_DB_DATA_SOURCE` or `DATABASE_URL`: Data source
    pub fn apply_env(mut self) -> Self {
        if let Ok(driver) = env::var("PETSTORE_DB_DRIVER") {
            self.driver = driver;
        }
        if let Ok(source) =
            env::var("PETSTORE_DB_DATA_SOURCE").or_else(|_| env::var("DATABASE_URL"))
        {
            self.data_source = source;
        }
        self
    }

    /// Create a configuration from defaults plus environment overrides.
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Resolve the driver name into a repository type.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        RepositoryType::from_str(&self.driver).map_err(RepositoryError::configuration)
    }

    /// Check that the configuration can be used to open a repository.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        let repo_type = self.repository_type()?;
        if repo_type == RepositoryType::Sqlite && self.data_source.trim().is_empty() {
            return Err(RepositoryError::configuration(
                "SQLite driver requires a non-empty data source",
            ));
        }
        if self.max_pool_size == 0 {
            return Err(RepositoryError::configuration(
                "max_pool_size must be at least 1",
            ));
        }
        Ok(())
    }

    /// Whether the data source names an in-memory SQLite database.
    ///
    /// Covers the plain `:memory:` name and the URI forms `file::memory:` and
    /// `file:<name>?mode=memory`.
    pub fn is_in_memory(&self) -> bool {
        let source = self.data_source.trim();
        if source == ":memory:" {
            return true;
        }

        let Some(uri) = source.strip_prefix("file:") else {
            return false;
        };
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, query),
            None => (uri, ""),
        };
        path == ":memory:" || query.split('&').any(|param| param == "mode=memory")
    }
}

//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::config::DatabaseConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
use super::repositories::SqliteRepository;
use super::repository::{PetStoreRepository, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// SQLite + Diesel implementation
    Sqlite,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from a driver name.
    ///
    /// # Arguments
    /// * `s` - Driver name ("sqlite", "sqlite3", "local", "memory")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use petstore::db::{DatabaseConfig, RepositoryFactory};
///
/// let repo = RepositoryFactory::create(&DatabaseConfig::sqlite("petstore.db"))?;
/// let local = RepositoryFactory::create_local();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance from configuration.
    ///
    /// # Arguments
    /// * `config` - Driver name and data source
    ///
    /// # Returns
    /// * `Ok(Arc<dyn PetStoreRepository>)` - Repository instance
    /// * `Err(RepositoryError)` - If the configuration is invalid or the
    ///   backend cannot be opened
    pub fn create(config: &DatabaseConfig) -> RepositoryResult<Arc<dyn PetStoreRepository>> {
        config.validate()?;

        match config.repository_type()? {
            RepositoryType::Sqlite => {
                #[cfg(feature = "sqlite-repo")]
                {
                    let repo = Self::create_sqlite(config)?;
                    Ok(repo as Arc<dyn PetStoreRepository>)
                }
                #[cfg(not(feature = "sqlite-repo"))]
                {
                    Err(super::repository::RepositoryError::configuration(
                        "SQLite repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a SQLite repository.
    #[cfg(feature = "sqlite-repo")]
    pub fn create_sqlite(config: &DatabaseConfig) -> RepositoryResult<Arc<SqliteRepository>> {
        let repo = SqliteRepository::new(config.clone())?;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn PetStoreRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from defaults plus environment overrides.
    pub fn from_env() -> RepositoryResult<Arc<dyn PetStoreRepository>> {
        Self::create(&DatabaseConfig::from_env())
    }
}

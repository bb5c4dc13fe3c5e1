//! Database module for pet storage.
//!
//! This module provides abstractions for database operations via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Service Layer (services::petstore)                     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │                              │
//! ┌───▼──────────────┐   ┌───────────▼──────────┐
//! │ SqliteRepository │   │   LocalRepository    │
//! │ (Diesel + r2d2)  │   │     (in-memory)      │
//! └──────────────────┘   └──────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use petstore::db::{DatabaseConfig, RepositoryFactory};
//!
//! let config = DatabaseConfig::sqlite("petstore.db");
//! let repo = RepositoryFactory::create(&config)?;
//! ```

pub mod config;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use config::DatabaseConfig;
pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
pub use repositories::{PoolStats, SqliteRepository};
pub use repository::{ErrorContext, PetStoreRepository, RepositoryError, RepositoryResult};

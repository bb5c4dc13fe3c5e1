//! Repository implementations module.
//!
//! This module contains different implementations of the `PetStoreRepository` trait:
//! - `sqlite`: SQLite implementation with Diesel ORM
//! - `local`: In-memory implementation for unit testing and local development
pub mod local;
#[cfg(feature = "sqlite-repo")]
pub mod sqlite;

pub use local::LocalRepository;
#[cfg(feature = "sqlite-repo")]
pub use sqlite::{PoolStats, SqliteRepository};

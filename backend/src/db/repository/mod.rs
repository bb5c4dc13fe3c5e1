//! Repository trait definitions for pet storage.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`pets`]: Create/read/delete operations over the `pets` table

pub mod error;
pub mod pets;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use pets::PetStoreRepository;

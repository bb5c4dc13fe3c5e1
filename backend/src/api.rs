//! Public API surface for the petstore backend.
//!
//! This file consolidates the domain types exchanged between the HTTP layer,
//! the service layer and storage. All types derive Serialize/Deserialize for
//! JSON serialization.

pub use crate::models::condition::{QueryCondition, DEFAULT_LIMIT};
pub use crate::models::error::{PetStoreError, PetStoreResult};
pub use crate::models::pet::{NewPet, Pet, PetId};

/// Collection of pets as returned by list queries.
pub type Pets = Vec<Pet>;

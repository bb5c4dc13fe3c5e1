//! Storage operations for the pet resource.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{NewPet, Pet, PetId, QueryCondition};

/// Repository trait for pet storage.
///
/// Implementations translate a [`QueryCondition`] into a parameterized query
/// and execute create/read/delete statements. Input validation happens in the
/// service layer; implementations assume identifiers and names are valid.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across request handlers.
#[async_trait]
pub trait PetStoreRepository: Send + Sync {
    /// Check that storage is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List pets matching the condition.
    ///
    /// # Arguments
    /// * `condition` - Optional tag set and row limit
    ///
    /// # Returns
    /// * `Ok(Vec<Pet>)` - At most `condition.limit()` pets, in storage order
    /// * `Err(RepositoryError)` - If the query fails
    async fn query_pets(&self, condition: &QueryCondition) -> RepositoryResult<Vec<Pet>>;

    /// Fetch a single pet.
    ///
    /// Absence is reported as `Ok(None)`, not as an error.
    async fn query_pet(&self, id: PetId) -> RepositoryResult<Option<Pet>>;

    /// Insert a pet and return it with its assigned identifier.
    async fn create_pet(&self, pet: &NewPet) -> RepositoryResult<Pet>;

    /// Delete a pet.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows deleted (zero when the id is unknown)
    /// * `Err(RepositoryError)` - If the statement fails
    async fn delete_pet(&self, id: PetId) -> RepositoryResult<usize>;
}

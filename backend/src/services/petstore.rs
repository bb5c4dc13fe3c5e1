//! Pet store usecases.
//!
//! The service validates identifiers and payloads, delegates to the
//! repository, and collapses storage failures into
//! [`PetStoreError::InternalError`]. Absence stays a value (`None`, or zero
//! affected rows); turning it into `NotFound` is left to the caller.

use async_trait::async_trait;
use std::sync::Arc;

use super::validation::{validate_condition, validate_new_pet, validate_pet_id};
use crate::api::{NewPet, Pet, PetId, PetStoreResult, QueryCondition};
use crate::db::repository::PetStoreRepository;

/// Usecase boundary consumed by the HTTP layer.
#[async_trait]
pub trait PetStoreUsecase: Send + Sync {
    /// List pets matching the condition.
    async fn find_pets(&self, condition: &QueryCondition) -> PetStoreResult<Vec<Pet>>;

    /// Look up a pet; `Ok(None)` when no row matches.
    async fn find_pet_by_id(&self, id: PetId) -> PetStoreResult<Option<Pet>>;

    /// Store a new pet and return it with its assigned id.
    async fn add_pet(&self, pet: NewPet) -> PetStoreResult<Pet>;

    /// Delete a pet and return the number of affected rows.
    async fn delete_pet(&self, id: PetId) -> PetStoreResult<usize>;

    /// Probe storage connectivity.
    async fn health_check(&self) -> PetStoreResult<bool>;
}

/// Default usecase implementation backed by a repository.
#[derive(Clone)]
pub struct PetStoreService {
    repository: Arc<dyn PetStoreRepository>,
}

impl PetStoreService {
    pub fn new(repository: Arc<dyn PetStoreRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn PetStoreRepository> {
        &self.repository
    }
}

#[async_trait]
impl PetStoreUsecase for PetStoreService {
    async fn find_pets(&self, condition: &QueryCondition) -> PetStoreResult<Vec<Pet>> {
        validate_condition(condition)?;
        Ok(self.repository.query_pets(condition).await?)
    }

    async fn find_pet_by_id(&self, id: PetId) -> PetStoreResult<Option<Pet>> {
        validate_pet_id(id)?;
        Ok(self.repository.query_pet(id).await?)
    }

    async fn add_pet(&self, pet: NewPet) -> PetStoreResult<Pet> {
        validate_new_pet(&pet)?;
        Ok(self.repository.create_pet(&pet).await?)
    }

    async fn delete_pet(&self, id: PetId) -> PetStoreResult<usize> {
        validate_pet_id(id)?;
        let affected = self.repository.delete_pet(id).await?;
        log::info!("delete_pet id={} affected_rows={}", id, affected);
        Ok(affected)
    }

    async fn health_check(&self) -> PetStoreResult<bool> {
        Ok(self.repository.health_check().await?)
    }
}

#[cfg(test)]
#[path = "petstore_tests.rs"]
mod tests;

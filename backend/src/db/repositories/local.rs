//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository trait
//! suitable for unit testing and local development. Pets live in an ordered
//! map keyed by id, giving fast, deterministic and isolated execution.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{NewPet, Pet, PetId, QueryCondition};
use crate::db::repository::{ErrorContext, PetStoreRepository, RepositoryError, RepositoryResult};

/// In-memory local repository.
///
/// Identifiers are handed out from a monotonically increasing counter and are
/// never reused after deletion, matching an auto-increment column.
///
/// # Example
/// ```
/// use petstore::api::{NewPet, QueryCondition};
/// use petstore::db::repositories::LocalRepository;
/// use petstore::db::repository::PetStoreRepository;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = LocalRepository::new();
///     repo.create_pet(&NewPet::new("rex", None)).await.unwrap();
///     let pets = repo.query_pets(&QueryCondition::new()).await.unwrap();
///     assert_eq!(pets.len(), 1);
/// });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    pets: BTreeMap<PetId, Pet>,
    next_id: i64,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            pets: BTreeMap::new(),
            next_id: 1,
            is_healthy: true,
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy every operation fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository. The id counter keeps running.
    pub fn clear(&self) {
        self.data.write().pets.clear();
    }

    /// Get the number of pets stored.
    pub fn pet_count(&self) -> usize {
        self.data.read().pets.len()
    }

    /// Check if a pet exists.
    pub fn has_pet(&self, id: PetId) -> bool {
        self.data.read().pets.contains_key(&id)
    }

    fn ensure_healthy(data: &LocalData, operation: &str) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "local repository marked unhealthy",
                ErrorContext::new(operation).with_entity("pet"),
            ))
        }
    }
}

#[async_trait]
impl PetStoreRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn query_pets(&self, condition: &QueryCondition) -> RepositoryResult<Vec<Pet>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "query_pets")?;

        let limit = usize::try_from(condition.limit()).map_err(|_| {
            RepositoryError::query_with_context(
                format!("invalid limit {}", condition.limit()),
                ErrorContext::new("query_pets"),
            )
        })?;
        let tags = condition.tag_filter();

        Ok(data
            .pets
            .values()
            .filter(|pet| match tags {
                Some(tags) => pet
                    .tag
                    .as_ref()
                    .is_some_and(|tag| tags.iter().any(|t| t == tag)),
                None => true,
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn query_pet(&self, id: PetId) -> RepositoryResult<Option<Pet>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "query_pet")?;
        Ok(data.pets.get(&id).cloned())
    }

    async fn create_pet(&self, pet: &NewPet) -> RepositoryResult<Pet> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "create_pet")?;

        let id = PetId(data.next_id);
        data.next_id += 1;
        let stored = pet.clone().into_pet(id);
        data.pets.insert(id, stored.clone());
        log::debug!("Inserted pet id={}", id);
        Ok(stored)
    }

    async fn delete_pet(&self, id: PetId) -> RepositoryResult<usize> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "delete_pet")?;
        Ok(usize::from(data.pets.remove(&id).is_some()))
    }
}

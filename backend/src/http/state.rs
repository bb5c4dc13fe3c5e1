//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::PetStoreRepository;
use crate::services::{PetStoreService, PetStoreUsecase};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Usecase layer the handlers delegate to
    pub service: Arc<dyn PetStoreUsecase>,
}

impl AppState {
    /// Create a new application state with the given usecase implementation.
    pub fn new(service: Arc<dyn PetStoreUsecase>) -> Self {
        Self { service }
    }

    /// Wire the default service on top of a repository.
    pub fn from_repository(repository: Arc<dyn PetStoreRepository>) -> Self {
        Self::new(Arc::new(PetStoreService::new(repository)))
    }
}

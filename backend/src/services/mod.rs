//! Service layer for business logic and orchestration.
//!
//! This module contains the usecase layer that sits between the repository
//! and the HTTP handlers. It validates inputs and translates storage outcomes
//! into the sentinel errors the delivery layer understands.

pub mod petstore;
pub mod validation;

pub use petstore::{PetStoreService, PetStoreUsecase};
pub use validation::{validate_condition, validate_new_pet, validate_pet_id};

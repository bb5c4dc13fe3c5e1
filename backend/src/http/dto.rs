//! Data Transfer Objects for the HTTP API.
//!
//! Pets are serialized directly from the domain types; this module adds the
//! request-side shapes and the health payload.

use serde::{Deserialize, Serialize};

pub use crate::api::{NewPet, Pet, PetId};
use crate::api::{PetStoreError, PetStoreResult, QueryCondition};

/// Request body for creating a pet.
pub type NewPetRequest = NewPet;

/// Query parameters for `GET /pets`.
///
/// `tags` may repeat (`?tags=a&tags=b`), which the plain struct deserializer
/// cannot express, so the handler collects raw pairs and decodes them here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindPetsParams {
    /// Tags to filter by (any match)
    pub tags: Option<Vec<String>>,
    /// Maximum number of results
    pub limit: Option<i64>,
}

impl FindPetsParams {
    /// Decode raw query pairs. Unknown keys are ignored; a `limit` that is
    /// not an integer or is negative is rejected.
    pub fn from_pairs<I>(pairs: I) -> PetStoreResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "tags" => params.tags.get_or_insert_with(Vec::new).push(value),
                "limit" => {
                    let limit = value
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| PetStoreError::BadRequest)?;
                    params.limit = Some(limit);
                }
                _ => {}
            }
        }

        if params.limit.is_some_and(|limit| limit < 0) {
            return Err(PetStoreError::BadRequest);
        }
        Ok(params)
    }

    /// Build the storage filter for these parameters.
    pub fn into_condition(self) -> QueryCondition {
        QueryCondition {
            tags: self.tags.filter(|tags| !tags.is_empty()),
            limit: self.limit,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Database connection status
    pub database: String,
}

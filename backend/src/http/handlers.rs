//! HTTP handlers for the REST API.
//!
//! Each handler decodes its input, delegates to the usecase layer and maps
//! the outcome onto a status code.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use super::dto::{FindPetsParams, HealthResponse, NewPetRequest, Pet};
use super::error::{ApiError, AppError};
use super::state::AppState;
use crate::api::{PetId, PetStoreError};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn pet_id_from_path(path: Result<Path<i64>, PathRejection>) -> Result<PetId, AppError> {
    match path {
        Ok(Path(id)) => Ok(PetId::new(id)),
        Err(rejection) => {
            tracing::debug!(%rejection, "invalid pet id in path");
            Err(PetStoreError::BadRequest.into())
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and storage is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.service.health_check().await {
        Ok(true) => "connected",
        Ok(false) => "disconnected",
        Err(_) => "error",
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status.to_string(),
    }))
}

// =============================================================================
// Pets
// =============================================================================

/// GET /pets
///
/// List pets, optionally filtered by `tags` (repeatable) and capped by `limit`.
pub async fn find_pets(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> HandlerResult<Vec<Pet>> {
    let Query(pairs) = query.map_err(|rejection| {
        tracing::debug!(%rejection, "undecodable query string");
        AppError::from(PetStoreError::BadRequest)
    })?;

    let condition = FindPetsParams::from_pairs(pairs)?.into_condition();
    let pets = state.service.find_pets(&condition).await?;
    Ok(Json(pets))
}

/// POST /pets
///
/// Create a pet. Responds 200 with the stored pet, including its new id.
pub async fn add_pet(
    State(state): State<AppState>,
    body: Result<Json<NewPetRequest>, JsonRejection>,
) -> HandlerResult<Pet> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "invalid pet body");
        AppError::from(PetStoreError::BadRequest)
    })?;

    let pet = state.service.add_pet(request).await?;
    tracing::info!(pet_id = %pet.id, "pet created");
    Ok(Json(pet))
}

/// GET /pets/{id}
///
/// Fetch a single pet. A missing row is reported as 404.
pub async fn find_pet_by_id(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> HandlerResult<Pet> {
    let id = pet_id_from_path(path)?;

    match state.service.find_pet_by_id(id).await? {
        Some(pet) => Ok(Json(pet)),
        None => Err(PetStoreError::NotFound.into()),
    }
}

/// DELETE /pets/{id}
///
/// Delete a pet. Responds 204 when a row was removed and 404 when none was.
pub async fn delete_pet(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = pet_id_from_path(path)?;

    let affected = state.service.delete_pet(id).await?;
    if affected == 0 {
        return Err(PetStoreError::NotFound.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unrouted paths.
pub async fn route_not_found() -> AppError {
    PetStoreError::NotFound.into()
}

/// Fallback for a routed path called with an unsupported method.
pub async fn method_not_allowed() -> (StatusCode, Json<ApiError>) {
    let status = StatusCode::METHOD_NOT_ALLOWED;
    (status, Json(ApiError::new(status.as_u16(), "Method Not Allowed")))
}

//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::PetStoreError;

/// API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code
    pub code: u16,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// One of the service sentinels
    PetStore(PetStoreError),
    /// Any other failure; reported as an internal error without detail
    Unexpected(String),
}

impl AppError {
    /// Status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::PetStore(PetStoreError::BadRequest) => StatusCode::BAD_REQUEST,
            AppError::PetStore(PetStoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::PetStore(PetStoreError::InternalError) | AppError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::PetStore(err) => err.to_string(),
            AppError::Unexpected(_) => PetStoreError::InternalError.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Unexpected(detail) => {
                tracing::error!(status = status.as_u16(), %detail, "unexpected handler failure");
            }
            AppError::PetStore(err) if status.is_server_error() => {
                tracing::error!(status = status.as_u16(), error = %err, "request failed");
            }
            AppError::PetStore(err) => {
                tracing::debug!(status = status.as_u16(), error = %err, "request rejected");
            }
        }

        let body = ApiError::new(status.as_u16(), self.public_message());
        (status, Json(body)).into_response()
    }
}

impl From<PetStoreError> for AppError {
    fn from(err: PetStoreError) -> Self {
        AppError::PetStore(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(PetStoreError::BadRequest).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(PetStoreError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(PetStoreError::InternalError).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Unexpected("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unexpected_error_hides_detail() {
        let err = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.public_message(), "Internal Server Error");
    }

    #[test]
    fn test_sentinel_codes_agree_with_http_status() {
        for err in [
            PetStoreError::BadRequest,
            PetStoreError::NotFound,
            PetStoreError::InternalError,
        ] {
            assert_eq!(AppError::from(err).status().as_u16(), err.status_code());
        }
    }
}

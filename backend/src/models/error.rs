//! Outcome classes surfaced to callers of the service layer.

/// Sentinel error returned by the usecase layer.
///
/// Each kind carries only its static message; storage details never cross
/// this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum PetStoreError {
    /// Client-correctable input problem.
    #[error("Requested Parameter or Body Not Valid")]
    BadRequest,
    /// The addressed pet does not exist.
    #[error("Requested Resource Not Found")]
    NotFound,
    /// Storage or other internal failure.
    #[error("Internal Server Error")]
    InternalError,
}

impl PetStoreError {
    /// HTTP status code associated with this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            PetStoreError::BadRequest => 400,
            PetStoreError::NotFound => 404,
            PetStoreError::InternalError => 500,
        }
    }
}

/// Result type for usecase operations.
pub type PetStoreResult<T> = Result<T, PetStoreError>;

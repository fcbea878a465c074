//! Error types for MockDrive.

use serde::Serialize;
use thiserror::Error;

/// Common error type for MockDrive operations.
#[derive(Error, Debug)]
pub enum MockDriveError {
    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Name collision with an existing resource.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Validation error for caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Authentication error (bad credentials, invalid or expired token).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MockDriveError {
    /// The HTTP status code the simulated backend would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            MockDriveError::NotFound(_) => 404,
            MockDriveError::Conflict(_) => 409,
            MockDriveError::Validation(_) => 400,
            MockDriveError::Auth(_) => 401,
            MockDriveError::Permission(_) => 403,
            MockDriveError::Config(_) | MockDriveError::Io(_) => 500,
        }
    }

    /// Convert into the wire-shaped error body the simulated REST API
    /// hands to callers.
    pub fn to_api(&self) -> ApiError {
        ApiError::from(self)
    }
}

/// Error body in the shape of the simulated REST API:
/// `{ "message": ..., "statusCode": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Display-ready error message.
    pub message: String,
    /// Simulated HTTP status code.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl From<&MockDriveError> for ApiError {
    fn from(err: &MockDriveError) -> Self {
        Self {
            message: err.to_string(),
            status_code: err.status_code(),
        }
    }
}

impl From<MockDriveError> for ApiError {
    fn from(err: MockDriveError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for MockDrive operations.
pub type Result<T> = std::result::Result<T, MockDriveError>;

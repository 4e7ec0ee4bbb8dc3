//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps domain errors onto HTTP
//! status codes. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use driftwood_core::{CartError, CatalogError};

use crate::pdf::PdfError;
use crate::users::StoreError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog could not be loaded or is unusable.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// User store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// PDF rendering failed.
    #[error("Pdf error: {0}")]
    Pdf(#[from] PdfError),

    /// Session read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Login rejected; deliberately carries no detail.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User is not authenticated.
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not permitted.
    #[error("Forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Catalog(_) | Self::Pdf(_) | Self::Session(_) | Self::Internal(_)
        ) || matches!(
            self,
            Self::Store(StoreError::Io(_) | StoreError::Malformed(_) | StoreError::Poisoned)
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Catalog(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Cart(err) => match err {
                CartError::InvalidQuantity => StatusCode::UNPROCESSABLE_ENTITY,
                CartError::LineOutOfRange(_) => StatusCode::NOT_FOUND,
            },
            Self::Store(err) => match err {
                StoreError::DuplicateUser(_) => StatusCode::CONFLICT,
                StoreError::UnknownUser(_) => StatusCode::NOT_FOUND,
                StoreError::ProtectedUser => StatusCode::FORBIDDEN,
                StoreError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Pdf(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Catalog(_) => "Catalog unavailable".to_string(),
            Self::Pdf(_) | Self::Session(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Store(err) => match err {
                StoreError::DuplicateUser(name) => format!("User '{name}' already exists"),
                StoreError::UnknownUser(name) => format!("User '{name}' not found"),
                StoreError::ProtectedUser => "The admin account cannot be removed".to_string(),
                StoreError::WeakPassword(msg) => msg.clone(),
                _ => "Internal server error".to_string(),
            },
            Self::InvalidCredentials => "Invalid username or password".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

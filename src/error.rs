//! Error handling for the Business Directory backend
//!
//! Every failure a handler can produce maps to a structured JSON body of the
//! form `{message, error?}` and an HTTP status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Entity absent by id or username
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation (duplicate name/username)
    #[error("{0}")]
    Conflict(String),

    /// Malformed or missing input field
    #[error("{0}")]
    InvalidInput(String),

    /// Delete blocked by a dependent row
    #[error("{0}")]
    ReferentialConflict(String),

    /// No bearer token on a protected route
    #[error("Authentication token required")]
    MissingToken,

    /// Token present but past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Token present but signature or claims are invalid
    #[error("Invalid token")]
    InvalidToken,

    /// Credential mismatch at login
    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Hashing/signing or other unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body: `{message, error?}`
#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: msg.clone(),
                    error: None,
                },
            ),
            // Duplicates report as 400, not 409
            AppError::Conflict(msg)
            | AppError::InvalidInput(msg)
            | AppError::ReferentialConflict(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: msg.clone(),
                    error: None,
                },
            ),
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    message: "Authentication token required".to_string(),
                    error: None,
                },
            ),
            AppError::TokenExpired => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    message: "Token expired".to_string(),
                    error: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    message: "Invalid token".to_string(),
                    error: None,
                },
            ),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    message: msg.clone(),
                    error: None,
                },
            ),
            AppError::Database(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    message: "Server error".to_string(),
                    error: Some(err.to_string()),
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    message: "Server error".to_string(),
                    error: Some(msg.clone()),
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("request failed: {:?}", self);
        } else {
            tracing::debug!("request rejected: {:?}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// True when the error is a Postgres unique-constraint violation (23505).
///
/// The uniqueness pre-checks in the services are a fast path for a friendly
/// message; the unique indexes underneath are authoritative. When a
/// concurrent writer wins the race, the violation is translated back into
/// the same conflict response the pre-check would have produced.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;

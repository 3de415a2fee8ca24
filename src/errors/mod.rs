//! Error handling module for the Zogakzip backend.
//!
//! Provides a centralized error type with mapping to HTTP status codes.
//! Error bodies carry a single human-readable `message` field and nothing
//! else; this shape is part of the frontend contract.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed required fields
    Validation(String),
    /// Resource not found
    NotFound(String),
    /// Secret mismatch on update/delete
    Forbidden(String),
    /// Secret mismatch on explicit password verification
    Unauthorized(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message exposed to the caller.
    ///
    /// Server-side failures are replaced by a generic message; the real
    /// cause is logged where the error is constructed.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Database(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Validation failure with the contract's standard wording.
    pub fn bad_request() -> Self {
        AppError::Validation("Bad request".to_string())
    }

    /// Not-found failure with the contract's standard wording.
    pub fn not_found() -> Self {
        AppError::NotFound("Not found".to_string())
    }

    /// Forbidden failure with the contract's standard wording.
    pub fn wrong_password() -> Self {
        AppError::Forbidden("Wrong password".to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "validation: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Forbidden(msg) => write!(f, "forbidden: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            AppError::Database(msg) => write!(f, "database: {}", msg),
            AppError::Internal(msg) => write!(f, "internal: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("bcrypt error: {:?}", err);
        AppError::Internal(format!("bcrypt error: {}", err))
    }
}

/// Error response body: a single human-readable message.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

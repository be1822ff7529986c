//! Centralized error handling.
//!
//! Two layers of errors live here:
//! - [`StoreError`]: signals raised by the persistence stores
//! - [`AppError`]: the domain-level kinds surfaced to callers, with
//!   automatic HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Signals raised by the persistence stores.
///
/// Services translate the first two into domain kinds where a use case
/// requires it; everything else propagates untouched.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    EntityNotFound { entity: &'static str, id: i64 },

    #[error("Integrity constraint violated: {0}")]
    IntegrityViolation(String),

    #[error(transparent)]
    Db(DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::EntityNotFound { entity, id }
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg))
            | Some(SqlErr::UniqueConstraintViolation(msg)) => StoreError::IntegrityViolation(msg),
            _ => StoreError::Db(err),
        }
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    UserNotFound(String),

    #[error("{0}")]
    Unauthenticated(String),

    // Resource errors
    #[error("{0}")]
    ResourceNotFound(String),

    #[error("{0}")]
    Database(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Storage error")]
    Store(#[from] StoreError),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Store(StoreError::from(err))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::UserNotFound(_) => "USER_NOT_FOUND",
            AppError::Unauthenticated(_) => "UNAUTHENTICATED",
            AppError::ResourceNotFound(_) => "NOT_FOUND",
            AppError::Database(_) => "INTEGRITY_VIOLATION",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Store(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized
            | AppError::InvalidCredentials
            | AppError::UserNotFound(_)
            | AppError::Unauthenticated(_)
            | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for internal/security errors
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Full operator-facing description, including the causes that
    /// `Display` and the HTTP body keep hidden.
    pub fn detail(&self) -> String {
        match self {
            AppError::Internal(msg) => msg.clone(),
            AppError::Store(e) => format!("Storage error: {}", e),
            AppError::Jwt(e) => format!("Authentication error: {}", e),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, what: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, what: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::resource_not_found(what))
    }
}

/// Convenience constructors
impl AppError {
    pub fn resource_not_found(what: impl std::fmt::Display) -> Self {
        AppError::ResourceNotFound(format!("{} not found", what))
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

//! Unified error types for the users service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Startup and command-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures raised by the data-access layer.
///
/// Absence of a row is not an error; see [`crate::users::Lookup`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The driver or the server rejected a statement.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Insert reported an id that does not fit the id column type.
    #[error("generated id {0} out of range")]
    InvalidGeneratedId(u64),

    /// Failure in a non-SQL store (test doubles).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    #[schema(example = "User not found")]
    pub message: String,
}

/// Message for malformed ids.
pub const MSG_INVALID_ID: &str = "Bad Request - Invalid id";
/// Message for create/update bodies missing string names.
pub const MSG_INVALID_BODY: &str = "Bad Request - firstName and lastName must be strings";
/// Message when a single user is absent.
pub const MSG_USER_NOT_FOUND: &str = "User not found";
/// Message when the table is empty.
pub const MSG_USERS_NOT_FOUND: &str = "Users not found";
/// Message for any unexpected failure.
pub const MSG_INTERNAL: &str = "Internal Server Error";

/// Request-level errors, mapped to a response in one place.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Path id is not a non-negative integer.
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    /// firstName/lastName missing or not strings.
    #[error("invalid user body")]
    InvalidBody,

    /// No row with the requested id.
    #[error("user {0} not found")]
    UserNotFound(i64),

    /// Numeric id larger than any stored id can be.
    #[error("user {0} not found (id out of range)")]
    IdOutOfRange(String),

    /// The users table is empty.
    #[error("no users found")]
    UsersNotFound,

    /// Inserted row could not be read back.
    #[error("inserted row could not be read back")]
    CreatedRowMissing,

    /// Unexpected data-access failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound(_) | ApiError::IdOutOfRange(_) | ApiError::UsersNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::CreatedRowMissing | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Store details are never exposed.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidId(_) => MSG_INVALID_ID,
            ApiError::InvalidBody => MSG_INVALID_BODY,
            ApiError::UserNotFound(_) | ApiError::IdOutOfRange(_) => MSG_USER_NOT_FOUND,
            ApiError::UsersNotFound => MSG_USERS_NOT_FOUND,
            ApiError::CreatedRowMissing | ApiError::Store(_) => MSG_INTERNAL,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => tracing::error!(error = %e, "request failed in store"),
            ApiError::CreatedRowMissing => tracing::error!("inserted user missing on re-fetch"),
            other => tracing::debug!(error = %other, "request rejected"),
        }

        let body = Json(ErrorBody {
            message: self.message().to_string(),
        });

        (self.status(), body).into_response()
    }
}

/// Convenient Result type alias for startup code.
pub type Result<T> = std::result::Result<T, AppError>;

//! HTTP API handlers for the users resource.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::ToSchema;

use super::extract::{UserId, UserPayload};
use crate::error::{ApiError, ErrorBody};
use crate::users::{Lookup, MySqlUserStore, NewUser, User, UserStore};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Data access for the users table.
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Create new app state around any store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create app state backed by a MySQL pool.
    pub fn with_mysql(store: MySqlUserStore) -> Self {
        Self::new(Arc::new(store))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Get all users within the users table.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Every user", body = Vec<User>),
        (status = 404, description = "Table is empty", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    match state.store.fetch_all().await? {
        Lookup::Found(users) => {
            debug!(count = users.len(), "listed users");
            Ok(Json(users))
        }
        Lookup::NotFound => Err(ApiError::UsersNotFound),
    }
}

/// Create a single user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = NewUser,
    responses(
        (status = 200, description = "The created user", body = User),
        (status = 400, description = "firstName or lastName missing or not a string", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    UserPayload(input): UserPayload,
) -> Result<Json<User>, ApiError> {
    match state
        .store
        .insert(&input.first_name, &input.last_name)
        .await?
    {
        Lookup::Found(user) => {
            info!(id = user.id, "user created");
            Ok(Json(user))
        }
        // Row removed between the insert and the re-fetch.
        Lookup::NotFound => Err(ApiError::CreatedRowMissing),
    }
}

/// Get a single user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User's ID number")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<User>, ApiError> {
    match state.store.fetch_by_id(id).await? {
        Lookup::Found(user) => Ok(Json(user)),
        Lookup::NotFound => Err(ApiError::UserNotFound(id)),
    }
}

/// Update a single user's names.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User's ID number")),
    request_body = NewUser,
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 400, description = "Invalid id or body", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    UserPayload(input): UserPayload,
) -> Result<Json<User>, ApiError> {
    match state
        .store
        .update_by_id(id, &input.first_name, &input.last_name)
        .await?
    {
        Lookup::Found(user) => {
            info!(id, "user updated");
            Ok(Json(user))
        }
        Lookup::NotFound => Err(ApiError::UserNotFound(id)),
    }
}

/// Delete a single user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User's ID number")),
    responses(
        (status = 200, description = "Deleted; empty body"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<StatusCode, ApiError> {
    match state.store.delete_by_id(id).await? {
        Lookup::Found(()) => {
            info!(id, "user deleted");
            Ok(StatusCode::OK)
        }
        Lookup::NotFound => Err(ApiError::UserNotFound(id)),
    }
}

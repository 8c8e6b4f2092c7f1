//! User row and store outcome types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single persisted row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Generated by the store on insert.
    #[schema(example = 1)]
    pub id: i64,
    /// Given name.
    #[sqlx(rename = "firstName")]
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name.
    #[sqlx(rename = "lastName")]
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Insert time, set once by the store.
    pub created: DateTime<Utc>,
}

/// Result of a store operation that may legitimately find nothing.
///
/// Absence is an expected outcome and is kept apart from store failures,
/// which travel as `Err(StoreError)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The target row (or rows) exists.
    Found(T),
    /// No matching row.
    NotFound,
}

impl<T> Lookup<T> {
    /// Build from an optional row.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Found(v),
            None => Self::NotFound,
        }
    }

    /// Convert into an `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(v) => Some(v),
            Self::NotFound => None,
        }
    }
}

impl<T> Lookup<Vec<T>> {
    /// An empty row set counts as not found.
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Self::NotFound
        } else {
            Self::Found(rows)
        }
    }
}

/// Validated first/last name pair for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Given name.
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Doe")]
    pub last_name: String,
}

//! Data-access contract for the `users` table.

use async_trait::async_trait;

use super::types::{Lookup, User};
use crate::error::StoreError;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Single-statement operations on the `users` table.
///
/// Implementations propagate driver failures unchanged as [`StoreError`]
/// and report missing rows through [`Lookup::NotFound`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All rows. `NotFound` when the table is empty.
    async fn fetch_all(&self) -> StoreResult<Lookup<Vec<User>>>;

    /// Row with the given id.
    async fn fetch_by_id(&self, id: i64) -> StoreResult<Lookup<User>>;

    /// Insert a row and return it as stored.
    async fn insert(&self, first_name: &str, last_name: &str) -> StoreResult<Lookup<User>>;

    /// Overwrite both names and return the refreshed row.
    async fn update_by_id(
        &self,
        id: i64,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Lookup<User>>;

    /// Remove a row permanently.
    async fn delete_by_id(&self, id: i64) -> StoreResult<Lookup<()>>;
}

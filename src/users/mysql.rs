//! MySQL implementation of [`UserStore`].

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::{debug, info, instrument};

use super::store::{StoreResult, UserStore};
use super::types::{Lookup, User};
use crate::config::Config;
use crate::error::StoreError;
use crate::metrics;

const SCHEMA: &str = include_str!("../../migrations/0001_create_users.sql");

const SELECT_ALL: &str = "SELECT id, firstName, lastName, created FROM users ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, firstName, lastName, created FROM users WHERE id = ?";
const INSERT: &str = "INSERT INTO users (firstName, lastName) VALUES (?, ?)";
const UPDATE_BY_ID: &str = "UPDATE users SET firstName = ?, lastName = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";

/// Pool-backed store. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    /// Open a connection pool using the database settings in `config`.
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(config.connect_options())
            .await?;

        info!(
            host = %config.db_host,
            database = %config.database,
            max_connections = config.db_max_connections,
            "Database pool ready"
        );

        Ok(Self { pool })
    }

    /// Underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Create the `users` table if it does not exist.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        let result = sqlx::query(SCHEMA).execute(&self.pool).await;
        track("ensure_schema", result)?;
        debug!("users table present");
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Count and log a failed statement, then hand the error up unchanged.
fn track<T>(operation: &'static str, result: Result<T, sqlx::Error>) -> StoreResult<T> {
    result.map_err(|e| {
        metrics::inc_store_errors(operation);
        debug!(operation, error = %e, "statement failed");
        StoreError::from(e)
    })
}

#[async_trait]
impl UserStore for MySqlUserStore {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> StoreResult<Lookup<Vec<User>>> {
        let _timer = metrics::timer_store_query("fetch_all");
        let result = sqlx::query_as::<_, User>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await;

        Ok(Lookup::from_rows(track("fetch_all", result)?))
    }

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: i64) -> StoreResult<Lookup<User>> {
        let _timer = metrics::timer_store_query("fetch_by_id");
        let result = sqlx::query_as::<_, User>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;

        Ok(Lookup::from_option(track("fetch_by_id", result)?))
    }

    #[instrument(skip(self))]
    async fn insert(&self, first_name: &str, last_name: &str) -> StoreResult<Lookup<User>> {
        let done = {
            let _timer = metrics::timer_store_query("insert");
            let result = sqlx::query(INSERT)
                .bind(first_name)
                .bind(last_name)
                .execute(&self.pool)
                .await;
            track("insert", result)?
        };

        let raw_id = done.last_insert_id();
        let id = i64::try_from(raw_id).map_err(|_| StoreError::InvalidGeneratedId(raw_id))?;
        debug!(id, "user inserted");

        self.fetch_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn update_by_id(
        &self,
        id: i64,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Lookup<User>> {
        let done = {
            let _timer = metrics::timer_store_query("update_by_id");
            let result = sqlx::query(UPDATE_BY_ID)
                .bind(first_name)
                .bind(last_name)
                .bind(id)
                .execute(&self.pool)
                .await;
            track("update_by_id", result)?
        };

        if done.rows_affected() != 1 {
            return Ok(Lookup::NotFound);
        }

        self.fetch_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> StoreResult<Lookup<()>> {
        let _timer = metrics::timer_store_query("delete_by_id");
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await;
        let done = track("delete_by_id", result)?;

        if done.rows_affected() == 0 {
            Ok(Lookup::NotFound)
        } else {
            Ok(Lookup::Found(()))
        }
    }
}

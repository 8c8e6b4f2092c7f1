//! Minimal JSON CRUD service for a single `users` table.
//!
//! Every request maps to one parameterized statement against MySQL:
//!
//! ```text
//! GET    /users       -> SELECT all      200 | 404 "Users not found"
//! POST   /users       -> INSERT + SELECT 200 | 400
//! GET    /users/{id}  -> SELECT by id    200 | 400 | 404
//! PATCH  /users/{id}  -> UPDATE + SELECT 200 | 400 | 404
//! DELETE /users/{id}  -> DELETE          200 | 400 | 404
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Error types and the error-to-response mapping
//! - [`users`]: Row types and the data-access layer
//! - [`api`]: Router, handlers, extractors and OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod users;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, AppError, Result, StoreError};

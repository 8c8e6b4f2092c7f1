//! HTTP API module for the users resource, health and documentation.

pub mod docs;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{create_router, metrics_router};

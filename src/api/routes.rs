//! HTTP API route definitions.

use axum::{extract::State, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_PATH};
use super::handlers::{
    create_user, delete_user, get_user, health, list_users, update_user, AppState,
};
use crate::metrics::track_http;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Users resource
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn(track_http))
        // API documentation
        .merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the Prometheus scrape router.
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(handle)
}

async fn render_metrics(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

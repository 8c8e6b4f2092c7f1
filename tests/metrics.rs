/// Request metrics tests
/// Installs the global Prometheus recorder, so this file holds a single test
mod common;

use axum::http::{Method, StatusCode};
use common::{send, test_app};

#[tokio::test]
async fn request_metrics_label_matched_routes_only() {
    let handle = users_api::metrics::install_recorder().expect("recorder");
    let (app, _store) = test_app();

    let missing = send(&app, Method::GET, "/users/42", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    let unknown = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let rendered = handle.render();
    let requests: Vec<&str> = rendered
        .lines()
        .filter(|l| l.starts_with("http_requests_total{"))
        .collect();

    assert_eq!(requests.len(), 1, "{rendered}");
    assert!(requests[0].contains(r#"route="/users/:id""#));
    assert!(requests[0].contains(r#"status="404""#));
    assert!(!rendered.contains("/accounts"));
}

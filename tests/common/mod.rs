//! Common test utilities and fixtures.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use tower::ServiceExt;

use users_api::api::{create_router, AppState};
use users_api::error::StoreError;
use users_api::users::{Lookup, StoreResult, User, UserStore};

/// In-memory `UserStore` that counts calls and can be switched to failing.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<BTreeMap<i64, User>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    /// Number of store operations invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every following operation fail like a lost connection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn enter(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection lost".to_string()));
        }
        Ok(())
    }

    fn get(&self, id: i64) -> Option<User> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn fetch_all(&self) -> StoreResult<Lookup<Vec<User>>> {
        self.enter()?;
        let rows = self.rows.lock().unwrap().values().cloned().collect();
        Ok(Lookup::from_rows(rows))
    }

    async fn fetch_by_id(&self, id: i64) -> StoreResult<Lookup<User>> {
        self.enter()?;
        Ok(Lookup::from_option(self.get(id)))
    }

    async fn insert(&self, first_name: &str, last_name: &str) -> StoreResult<Lookup<User>> {
        self.enter()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let user = User {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created: Utc::now(),
        };
        self.rows.lock().unwrap().insert(id, user);
        Ok(Lookup::from_option(self.get(id)))
    }

    async fn update_by_id(
        &self,
        id: i64,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Lookup<User>> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(row) => {
                row.first_name = first_name.to_string();
                row.last_name = last_name.to_string();
                Ok(Lookup::Found(row.clone()))
            }
            None => Ok(Lookup::NotFound),
        }
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<Lookup<()>> {
        self.enter()?;
        let removed = self.rows.lock().unwrap().remove(&id);
        Ok(Lookup::from_option(removed.map(|_| ())))
    }
}

/// Router plus a handle on its store.
pub fn test_app() -> (Router, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    let app = create_router(AppState::new(store.clone()));
    (app, store)
}

/// Response status and raw body.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

/// Send one request through the router.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    json: Option<serde_json::Value>,
) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match json {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

/// Send a prebuilt request through the router.
pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse { status, body }
}

pub mod fixtures {
    pub const FIRST_NAME: &str = "John";
    pub const LAST_NAME: &str = "Doe";
}

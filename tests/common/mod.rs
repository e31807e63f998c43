#![allow(dead_code)]

use std::sync::Arc;

use agrosense::agrosense_auth::Role;
use agrosense::agrosense_config::{CorsConfig, DedupPolicy, JwtConfig};
use agrosense::agrosense_db::memory::{MemoryParcelStore, MemoryReadingStore, MemoryUserStore};
use agrosense::modules::readings::service::IngestGuard;
use agrosense::router::{init_auth_app, init_ingest_app, init_parcels_app, init_sensors_app};
use agrosense::state::{AuthState, ParcelsState, ReadingsState};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

pub fn test_cors_config() -> CorsConfig {
    CorsConfig {
        allowed_origins: vec!["http://localhost:5173".to_string()],
    }
}

pub struct AuthApp {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
}

pub fn auth_app() -> AuthApp {
    let users = Arc::new(MemoryUserStore::new());
    let state = AuthState::new(users.clone(), test_jwt_config());
    AuthApp {
        router: init_auth_app(state, &test_cors_config(), None),
        users,
    }
}

pub struct ReadingsApp {
    pub router: Router,
    pub store: Arc<MemoryReadingStore>,
}

pub fn sensors_app() -> ReadingsApp {
    let store = Arc::new(MemoryReadingStore::new());
    let state = ReadingsState::new(IngestGuard::new(
        store.clone(),
        DedupPolicy::UpsertByTimestamp,
    ));
    ReadingsApp {
        router: init_sensors_app(state, &test_cors_config(), None),
        store,
    }
}

pub fn ingest_app(policy: DedupPolicy) -> ReadingsApp {
    let store = Arc::new(MemoryReadingStore::new());
    let state = ReadingsState::new(IngestGuard::new(store.clone(), policy));
    ReadingsApp {
        router: init_ingest_app(state, &test_cors_config(), None),
        store,
    }
}

pub struct ParcelsApp {
    pub router: Router,
    pub store: Arc<MemoryParcelStore>,
}

pub fn parcels_app() -> ParcelsApp {
    let store = Arc::new(MemoryParcelStore::new());
    ParcelsApp {
        router: init_parcels_app(ParcelsState::new(store.clone()), &test_cors_config(), None),
        store,
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Sends the request and returns status plus decoded JSON body.
pub async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = send(router, request).await;
    let status = response.status();
    (status, body_json(response).await)
}

pub async fn register(router: &Router, username: &str, password: &str, role: Option<&Role>) -> StatusCode {
    let mut body = serde_json::json!({ "username": username, "password": password });
    if let Some(role) = role {
        body["role"] = Value::String(role.as_str().to_string());
    }
    send(router, json_request("POST", "/register", &body))
        .await
        .status()
}

pub async fn login_token(router: &Router, username: &str, password: &str) -> String {
    let (status, body) = call(
        router,
        json_request(
            "POST",
            "/login",
            &serde_json::json!({ "username": username, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

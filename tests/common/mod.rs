#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use backend_api_signup::config::{CorsConfig, HashingConfig};
use backend_api_signup::store::MemoryUserStore;
use backend_api_signup::{AppState, create_app};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for oneshot

/// Cheapest bcrypt cost so the suites stay fast
pub fn test_hashing() -> HashingConfig {
    HashingConfig { cost: 4, timeout_secs: 10 }
}

pub fn app_with_store(store: &MemoryUserStore) -> Router {
    let state = AppState::new(Arc::new(store.clone()), test_hashing());
    create_app(state, &CorsConfig::default())
}

pub fn valid_signup() -> Value {
    json!({
        "name": "John Doe",
        "email": "test@example.com",
        "mobileNumber": "+1234567890",
        "password": "SecurePass123!",
        "confirmPassword": "SecurePass123!"
    })
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn post_signup(app: &Router, payload: &Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/signup", Body::from(payload.to_string())).await
}

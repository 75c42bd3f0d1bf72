mod common;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use backend_api_signup::store::memory::Operation;
use backend_api_signup::store::{MemoryUserStore, StoreError};
use common::{app_with_store, send};

#[tokio::test]
async fn health_check_flow() {
    let store = MemoryUserStore::new();
    let app = app_with_store(&store);

    let (status, body) = send(&app, Method::GET, "/health", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].as_bool().unwrap_or(false));
    assert_eq!(body["message"], "OK");
}

#[tokio::test]
async fn health_check_reports_unreachable_store() {
    let store = MemoryUserStore::new();
    let app = app_with_store(&store);
    store
        .fail_next(Operation::Ping, StoreError::Unavailable("connection refused".into()))
        .await;

    let (status, body) = send(&app, Method::GET, "/health", Body::empty()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body["success"].as_bool().unwrap_or(true));
    assert_eq!(body["message"], "Unhealthy");
}

use axum::{Extension, Json, http::StatusCode};
use serde_json::Value;

use crate::app::AppState;
use crate::utils::response::ApiResponse;

pub async fn health(Extension(state): Extension<AppState>) -> (StatusCode, Json<ApiResponse<Value>>) {
    // Try a simple store round trip
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::success("OK"))),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(ApiResponse::error("Unhealthy")))
        }
    }
}

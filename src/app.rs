use std::sync::Arc;

use axum::{Extension, Router};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{CorsConfig, HashingConfig};
use crate::store::UserStore;

/// Shared per-process state handed to handlers.
///
/// Holds no per-request data; each request checks out its own store session.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub hashing: HashingConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, hashing: HashingConfig) -> Self {
        Self { store, hashing }
    }
}

pub fn build_router(cors: &CorsConfig) -> Router {
    let mut app = Router::new()
        .merge(crate::routes::signup_routes::signup_routes())
        .merge(crate::routes::health_routes::health_routes());

    if let Some(cors_layer) = cors_layer(cors) {
        app = app.layer(cors_layer);
    }

    app.layer(TraceLayer::new_for_http())
}

pub fn create_app(state: AppState, cors: &CorsConfig) -> Router {
    build_router(cors).layer(Extension(state))
}

// CORS is only installed when enabled or when an origin list is configured.
// `*` means any origin, anything else is a CSV of origins.
fn cors_layer(cors: &CorsConfig) -> Option<CorsLayer> {
    if !cors.enabled && cors.allowed_origins.is_none() {
        return None;
    }

    let origins = match cors.allowed_origins.as_deref().map(str::trim) {
        None | Some("*") => AllowOrigin::from(Any),
        Some(list) => AllowOrigin::list(
            list.split(',')
                .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
                .collect::<Vec<HeaderValue>>(),
        ),
    };

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any),
    )
}

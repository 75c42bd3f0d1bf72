use axum::{Router, routing::get};

use crate::handlers::health_handler::health;

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}

use axum::{Router, routing::post};

// Import the signup handler and the fallback for other verbs
use crate::handlers::signup_handler::{method_not_allowed, signup_handler};

// Function to create signup routes
pub fn signup_routes() -> Router {
    Router::new().route("/api/signup", post(signup_handler).fallback(method_not_allowed))
}

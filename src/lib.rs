pub mod config;
pub mod routes;
pub mod handlers;
pub mod schemas;
pub mod store;
pub mod utils;
pub mod models;

pub mod app;

pub use app::{AppState, create_app};

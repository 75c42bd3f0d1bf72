pub mod health_handler;
pub mod signup_handler;

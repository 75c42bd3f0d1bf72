use axum::{Json, http::StatusCode};

use crate::models::user::User;
use crate::utils::error::SignupError;
use crate::utils::response::ApiResponse;

/// Handler result type used by the signup endpoint.
///
/// The error side renders itself through `SignupError`'s `IntoResponse`.
pub type HandlerResult<T = User> = Result<(StatusCode, Json<ApiResponse<T>>), SignupError>;

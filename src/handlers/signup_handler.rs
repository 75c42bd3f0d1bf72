use axum::{
    Extension,
    Json,
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::Value;

use crate::app::AppState;
use crate::models::user::{NewUser, User};
// Import the signup request schema and its validator
use crate::schemas::register_schema::RegistrationRequest;
use crate::utils::error::{ConflictField, SignupError};
use crate::utils::handler::HandlerResult;
use crate::utils::password::hash_password_blocking;
// Import util response API
use crate::utils::response::ApiResponse;

// Handler for user signup
pub async fn signup_handler(
    Extension(state): Extension<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> HandlerResult {
    // An unreadable or oversized body gets the same envelope as unparsable JSON
    let body = body
        .map_err(|e| SignupError::MalformedInput(e.body_text()))
        .inspect_err(log_failure)?;
    tracing::debug!(bytes = body.len(), "signup request received");

    let user = register_user(&state, &body).await.inspect_err(log_failure)?;

    tracing::info!(user_id = user.id, "user created");
    let response = ApiResponse::success_with_user("User created successfully", user);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Run one signup from raw body bytes to the created user's safe projection.
///
/// Parse, validate, check for an existing email or mobile number, hash the
/// password, then create the record. The store session is acquired only once
/// the payload is known to be valid and is dropped on every return path.
pub async fn register_user(state: &AppState, body: &[u8]) -> Result<User, SignupError> {
    let raw: Value =
        serde_json::from_slice(body).map_err(|e| SignupError::MalformedInput(e.to_string()))?;

    // Validate the incoming payload
    let request = RegistrationRequest::from_body(&raw).map_err(SignupError::Validation)?;

    let mut session = state.store.acquire().await?;

    // Check for an existing user holding the same email or mobile number
    if let Some(existing) = session
        .find_by_email_or_mobile(&request.email, &request.mobile_number)
        .await?
    {
        let field = if existing.email.eq_ignore_ascii_case(&request.email) {
            ConflictField::Email
        } else {
            ConflictField::MobileNumber
        };
        return Err(SignupError::Conflict(field));
    }

    // Hash the password
    let password_hash =
        hash_password_blocking(request.password, state.hashing.cost, state.hashing.timeout_secs)
            .await?;

    // Insert the new user into the database
    let user = session
        .create(NewUser {
            name: request.name,
            email: request.email,
            mobile_number: request.mobile_number,
            password_hash,
        })
        .await?;

    Ok(user)
}

// Details only ever reach the server log, never the response body
fn log_failure(err: &SignupError) {
    match err {
        SignupError::MalformedInput(_) | SignupError::Validation(_) => {
            tracing::debug!(error = %err, "signup rejected");
        }
        SignupError::Conflict(_) | SignupError::LateConflict(_) => {
            tracing::warn!(error = %err, "signup conflict");
        }
        SignupError::StoreConnectivity(_) | SignupError::Unclassified(_) => {
            tracing::error!(error = %err, "signup failed");
        }
    }
}

/// Fallback for every verb the signup route does not serve
pub async fn method_not_allowed() -> impl IntoResponse {
    let response = ApiResponse::<Value>::error("Method not allowed");
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "POST")], Json(response))
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

use crate::store::StoreError;
use crate::utils::password::PasswordHashError;
use crate::utils::response::ApiResponse;
use crate::utils::validation::FieldViolation;

/// Which contact field a pre-existing user already holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    MobileNumber,
}

impl ConflictField {
    pub fn label(self) -> &'static str {
        match self {
            ConflictField::Email => "email",
            ConflictField::MobileNumber => "mobile number",
        }
    }
}

/// Every way a signup can fail, as seen by the HTTP caller.
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("request body is not valid JSON: {0}")]
    MalformedInput(String),
    #[error("validation failed with {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),
    #[error("a user with this {} already exists", .0.label())]
    Conflict(ConflictField),
    #[error("store unreachable: {0}")]
    StoreConnectivity(String),
    #[error("store rejected a duplicate: {0}")]
    LateConflict(String),
    #[error("unclassified failure: {0}")]
    Unclassified(String),
}

impl SignupError {
    pub fn status(&self) -> StatusCode {
        match self {
            SignupError::MalformedInput(_) | SignupError::Validation(_) => StatusCode::BAD_REQUEST,
            SignupError::Conflict(_) | SignupError::LateConflict(_) => StatusCode::CONFLICT,
            SignupError::StoreConnectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            SignupError::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing envelope. Store and hashing details stay server-side.
    pub fn to_response(&self) -> ApiResponse<Value> {
        match self {
            SignupError::MalformedInput(_) => ApiResponse::error("Malformed request body"),
            SignupError::Validation(violations) => {
                ApiResponse::error_with_violations("Validation failed", violations.clone())
            }
            SignupError::Conflict(field) => {
                ApiResponse::error(&format!("A user with this {} already exists", field.label()))
            }
            SignupError::LateConflict(_) => {
                ApiResponse::error("A user with this email or mobile number already exists")
            }
            SignupError::StoreConnectivity(_) => {
                ApiResponse::error("Database connection error. Please try again later.")
            }
            SignupError::Unclassified(_) => {
                ApiResponse::error("Internal server error. Please try again later.")
            }
        }
    }
}

impl From<StoreError> for SignupError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(detail) => SignupError::StoreConnectivity(detail),
            StoreError::UniqueViolation(detail) => SignupError::LateConflict(detail),
            StoreError::Backend(detail) => SignupError::Unclassified(detail),
        }
    }
}

impl From<PasswordHashError> for SignupError {
    fn from(err: PasswordHashError) -> Self {
        SignupError::Unclassified(err.to_string())
    }
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SignupError::MalformedInput("eof".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(SignupError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(SignupError::Conflict(ConflictField::Email).status(), StatusCode::CONFLICT);
        assert_eq!(SignupError::LateConflict("dup".into()).status(), StatusCode::CONFLICT);
        assert_eq!(SignupError::StoreConnectivity("down".into()).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(SignupError::Unclassified("boom".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_conflict_names_the_field() {
        let email = SignupError::Conflict(ConflictField::Email).to_response();
        assert_eq!(email.message, "A user with this email already exists");
        let mobile = SignupError::Conflict(ConflictField::MobileNumber).to_response();
        assert_eq!(mobile.message, "A user with this mobile number already exists");
    }

    #[test]
    fn test_details_are_not_echoed() {
        let response = SignupError::Unclassified("secret table layout".into()).to_response();
        assert!(!response.message.contains("secret"));
        let response = SignupError::StoreConnectivity("10.0.0.3:3306 refused".into()).to_response();
        assert!(!response.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_store_errors_map_to_taxonomy() {
        assert!(matches!(
            SignupError::from(StoreError::Unavailable("x".into())),
            SignupError::StoreConnectivity(_)
        ));
        assert!(matches!(
            SignupError::from(StoreError::UniqueViolation("x".into())),
            SignupError::LateConflict(_)
        ));
        assert!(matches!(SignupError::from(StoreError::Backend("x".into())), SignupError::Unclassified(_)));
    }
}

use serde::Serialize;

use crate::utils::validation::FieldViolation;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Convenience constructor when a created user should be returned
    pub fn success_with_user(message: &str, user: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            errors: None,
            user: Some(user),
        }
    }

    /// Success envelope without a payload (health checks)
    pub fn success(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            errors: None,
            user: None,
        }
    }

    /// Plain error envelope
    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: None,
            user: None,
        }
    }

    /// Error constructor that includes the itemized validation violations
    pub fn error_with_violations(message: &str, errors: Vec<FieldViolation>) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: Some(errors),
            user: None,
        }
    }
}

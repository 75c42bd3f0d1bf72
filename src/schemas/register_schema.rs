use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::utils::validation::{rule_error, validate_payload, BodyField, FieldViolation};

// Characters accepted as the "special" class in passwords
const PASSWORD_SPECIALS: &str = "@$!%*?&";

static MOBILE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9][0-9]{1,14}$").unwrap());

// ASCII local part, then dot separated ASCII labels ending in an alphabetic TLD
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$").unwrap()
});

const EMAIL_MESSAGE: &str = "Please enter a valid email address";

const SIGNUP_FIELDS: &[BodyField] = &[
    BodyField { json: "name", rust: "name" },
    BodyField { json: "mobileNumber", rust: "mobile_number" },
    BodyField { json: "email", rust: "email" },
    BodyField { json: "password", rust: "password" },
    BodyField { json: "confirmPassword", rust: "confirm_password" },
];

// Order in which a field's failures are listed
const RULE_ORDER: &[&str] = &["invalid_format", "too_small", "too_big", "invalid_email", "weak_password"];

/// Signup payload. Name is trimmed, email trimmed and lowercased, while
/// deserializing, so the rules below see the normalized values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        length(min = 2, code = "too_small", message = "Name must be at least 2 characters long"),
        custom(function = "name_within_limit")
    )]
    pub name: String,

    #[validate(
        regex(
            path = *MOBILE_NUMBER,
            code = "invalid_format",
            message = "Mobile number must be in international format (e.g., +1234567890)"
        ),
        length(min = 8, code = "too_small", message = "Mobile number is too short"),
        custom(function = "mobile_within_limit")
    )]
    pub mobile_number: String,

    #[serde(deserialize_with = "trimmed_lowercase")]
    #[validate(custom(function = "is_email_address"))]
    pub email: String,

    #[validate(
        length(min = 8, code = "too_small", message = "Password must be at least 8 characters long"),
        custom(function = "is_strong_password")
    )]
    pub password: String,

    pub confirm_password: String,
}

impl RegistrationRequest {
    /// Validate an already-parsed JSON body.
    ///
    /// Field rules run first and are all reported together. The password
    /// confirmation is only compared once every field rule has passed, and
    /// its failure is reported under `confirmPassword`.
    pub fn from_body(raw: &Value) -> Result<Self, Vec<FieldViolation>> {
        let request: Self = validate_payload(raw, SIGNUP_FIELDS, RULE_ORDER)?;

        if request.password != request.confirm_password {
            return Err(vec![FieldViolation::new(&["confirmPassword"], "Passwords don't match")]);
        }

        Ok(request)
    }
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

fn trimmed_lowercase<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(String::deserialize(deserializer)?.trim().to_lowercase())
}

fn name_within_limit(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > 50 {
        return Err(rule_error("too_big", "Name must be less than 50 characters"));
    }
    Ok(())
}

fn mobile_within_limit(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > 15 {
        return Err(rule_error("too_big", "Mobile number is too long"));
    }
    Ok(())
}

// `validator`'s own email check accepts dotless hosts, IP literals and
// non-ASCII domains, so the address must also fit EMAIL_SHAPE
fn is_email_address(value: &str) -> Result<(), ValidationError> {
    let well_formed = value.validate_email()
        && EMAIL_SHAPE.is_match(value)
        && !value.starts_with('.')
        && !value.contains("..");
    if well_formed { Ok(()) } else { Err(rule_error("invalid_email", EMAIL_MESSAGE)) }
}

// Needs one lowercase, one uppercase, one digit and one special character
// somewhere, and the first character must itself be one of those classes.
fn is_strong_password(value: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);

    let strong = value.chars().next().is_some_and(allowed)
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if strong {
        Ok(())
    } else {
        Err(rule_error(
            "weak_password",
            "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character",
        ))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Safe projection of a stored user; never carries the password hash.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub created_at: DateTime<Utc>,
}

/// Contact fields of an existing user that collided with a signup
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct ExistingContact {
    pub email: String,
    pub mobile_number: String,
}

/// Fields written when a user is created
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
}

use thiserror::Error;

// Lowercased fragments that mark a failure description as a uniqueness rejection
const UNIQUE_KEYWORDS: &[&str] = &["unique constraint", "duplicate entry", "duplicate key", "1062"];

// Lowercased fragments that mark a failure description as a connectivity problem
const CONNECTIVITY_KEYWORDS: &[&str] = &[
    "connection",
    "database",
    "connect",
    "timed out",
    "broken pipe",
    "pool",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("store failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Classify a failure from its description alone.
    ///
    /// Only used when the store library gives no typed signal. Uniqueness
    /// keywords win over connectivity ones since duplicate-key messages often
    /// name the database or table.
    pub fn from_description(description: impl Into<String>) -> Self {
        let description = description.into();
        let lowered = description.to_lowercase();
        if UNIQUE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            StoreError::UniqueViolation(description)
        } else if CONNECTIVITY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            StoreError::Unavailable(description)
        } else {
            StoreError::Backend(description)
        }
    }
}

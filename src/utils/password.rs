use thiserror::Error;
use tokio::time::{Duration, timeout};

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("bcrypt failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("password hashing timed out after {0}s")]
    TimedOut(u64),
}

/// Hash a password in a blocking thread with a timeout and configurable cost.
///
/// The caller awaits the result, so creation never proceeds before the hash
/// exists; only the async runtime's worker threads are kept free.
pub async fn hash_password_blocking(
    password: String,
    cost: u32,
    timeout_secs: u64,
) -> Result<String, PasswordHashError> {
    let task = tokio::task::spawn_blocking(move || bcrypt::hash(&password, cost));

    match timeout(Duration::from_secs(timeout_secs), task).await {
        Ok(join_res) => Ok(join_res??),
        Err(_) => Err(PasswordHashError::TimedOut(timeout_secs)),
    }
}

use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::pool::PoolConnection;
use sqlx::{MySql, MySqlPool};

use crate::models::user::{ExistingContact, NewUser, User};
use crate::store::{StoreError, UserSession, UserStore};

/// `UserStore` backed by a MySQL pool
#[derive(Clone, Debug)]
pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn acquire(&self) -> Result<Box<dyn UserSession>, StoreError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(MySqlUserSession { conn }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

// The pooled connection goes back to the pool when the session is dropped
struct MySqlUserSession {
    conn: PoolConnection<MySql>,
}

#[async_trait]
impl UserSession for MySqlUserSession {
    async fn find_by_email_or_mobile(
        &mut self,
        email: &str,
        mobile_number: &str,
    ) -> Result<Option<ExistingContact>, StoreError> {
        // Rows matching on email sort first so an email collision is always reported
        let found = sqlx::query_as::<_, ExistingContact>(
            r#"
            SELECT email, mobile_number
            FROM users
            WHERE email = ? OR mobile_number = ?
            ORDER BY (email = ?) DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(mobile_number)
        .bind(email)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(found)
    }

    async fn create(&mut self, user: NewUser) -> Result<User, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, mobile_number, password)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.mobile_number)
        .bind(&user.password_hash)
        .execute(&mut *self.conn)
        .await?;

        let user_id = i64::try_from(result.last_insert_id())
            .map_err(|e| StoreError::Backend(format!("insert id out of range: {e}")))?;

        // Read back only the safe projection
        let created = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, mobile_number, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(created)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => StoreError::UniqueViolation(db_err.message().to_string()),
                // MySQL reports most codes as `Other`; judge by the server's own message
                ErrorKind::Other => StoreError::from_description(db_err.message()),
                _ => StoreError::Backend(err.to_string()),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            _ => StoreError::from_description(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_failures_are_unavailable() {
        assert!(matches!(StoreError::from(sqlx::Error::PoolTimedOut), StoreError::Unavailable(_)));
        assert!(matches!(StoreError::from(sqlx::Error::PoolClosed), StoreError::Unavailable(_)));
    }

    #[test]
    fn test_io_failure_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(StoreError::from(sqlx::Error::Io(io)), StoreError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_is_backend() {
        assert!(matches!(StoreError::from(sqlx::Error::RowNotFound), StoreError::Backend(_)));
    }
}

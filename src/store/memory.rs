use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::models::user::{ExistingContact, NewUser, User};
use crate::store::{StoreError, UserSession, UserStore};

/// Store operations that can be told to fail once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Acquire,
    Lookup,
    Create,
    Ping,
}

struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Inner {
    users: Mutex<Vec<StoredUser>>,
    next_id: AtomicI64,
    acquired: AtomicUsize,
    released: AtomicUsize,
    faults: Mutex<HashMap<Operation, StoreError>>,
}

impl Inner {
    async fn take_fault(&self, op: Operation) -> Result<(), StoreError> {
        match self.faults.lock().await.remove(&op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// In-process `UserStore` with the same uniqueness rules as the MySQL schema.
///
/// Cloning shares the underlying data. Sessions handed out are counted on
/// acquisition and on drop so callers can check that each one was released.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call of `op` fail with `err`
    pub async fn fail_next(&self, op: Operation, err: StoreError) {
        self.inner.faults.lock().await.insert(op, err);
    }

    pub fn acquired_sessions(&self) -> usize {
        self.inner.acquired.load(Ordering::SeqCst)
    }

    pub fn released_sessions(&self) -> usize {
        self.inner.released.load(Ordering::SeqCst)
    }

    pub async fn user_count(&self) -> usize {
        self.inner.users.lock().await.len()
    }

    /// Stored hash for the user with this (normalized) email
    pub async fn password_hash_for(&self, email: &str) -> Option<String> {
        let users = self.inner.users.lock().await;
        users
            .iter()
            .find(|stored| stored.user.email == email)
            .map(|stored| stored.password_hash.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn acquire(&self) -> Result<Box<dyn UserSession>, StoreError> {
        self.inner.take_fault(Operation::Acquire).await?;
        self.inner.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryUserSession { inner: Arc::clone(&self.inner) }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.take_fault(Operation::Ping).await
    }
}

struct MemoryUserSession {
    inner: Arc<Inner>,
}

impl Drop for MemoryUserSession {
    fn drop(&mut self) {
        self.inner.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserSession for MemoryUserSession {
    async fn find_by_email_or_mobile(
        &mut self,
        email: &str,
        mobile_number: &str,
    ) -> Result<Option<ExistingContact>, StoreError> {
        self.inner.take_fault(Operation::Lookup).await?;
        let users = self.inner.users.lock().await;
        let found = users
            .iter()
            .find(|stored| stored.user.email == email)
            .or_else(|| users.iter().find(|stored| stored.user.mobile_number == mobile_number))
            .map(|stored| ExistingContact {
                email: stored.user.email.clone(),
                mobile_number: stored.user.mobile_number.clone(),
            });
        Ok(found)
    }

    async fn create(&mut self, user: NewUser) -> Result<User, StoreError> {
        self.inner.take_fault(Operation::Create).await?;
        let mut users = self.inner.users.lock().await;

        if users.iter().any(|stored| stored.user.email == user.email) {
            return Err(StoreError::UniqueViolation("duplicate entry for key 'users.email'".into()));
        }
        if users.iter().any(|stored| stored.user.mobile_number == user.mobile_number) {
            return Err(StoreError::UniqueViolation(
                "duplicate entry for key 'users.mobile_number'".into(),
            ));
        }

        let created = User {
            id: self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: user.name,
            email: user.email,
            mobile_number: user.mobile_number,
            created_at: Utc::now(),
        };
        users.push(StoredUser { user: created.clone(), password_hash: user.password_hash });
        Ok(created)
    }
}

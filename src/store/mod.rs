//! Persistence seam for user records.
//!
//! Handlers talk to a [`UserStore`] and, per request, to the [`UserSession`]
//! it hands out. A session owns one store connection and gives it back when
//! dropped, so every exit path of a request releases it exactly once.

use async_trait::async_trait;

use crate::models::user::{ExistingContact, NewUser, User};

pub mod error;
pub mod memory;
pub mod mysql;

pub use error::StoreError;
pub use memory::MemoryUserStore;
pub use mysql::MySqlUserStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Check out a connection scoped to one request
    async fn acquire(&self) -> Result<Box<dyn UserSession>, StoreError>;

    /// Cheap round trip used by the health check
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UserSession: Send {
    /// Any user whose email or mobile number matches, email matches first.
    async fn find_by_email_or_mobile(
        &mut self,
        email: &str,
        mobile_number: &str,
    ) -> Result<Option<ExistingContact>, StoreError>;

    /// Insert a user and read back its safe projection.
    async fn create(&mut self, user: NewUser) -> Result<User, StoreError>;
}

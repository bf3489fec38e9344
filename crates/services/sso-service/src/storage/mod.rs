//! Credential store: users and applications.

pub mod entities;
mod memory_store;
mod sql_store;

pub use memory_store::MemoryStore;
pub use sql_store::SqlStore;

use async_trait::async_trait;

use common::StoreResult;
use domain::{App, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Storage capabilities the auth service depends on.
///
/// Every method is a single-row insert or lookup keyed by a unique column.
/// Implementations must report duplicate emails as `StoreError::UserExists`
/// from the insert itself, never from a separate existence check.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user and return the assigned id
    async fn save_user(&self, email: &str, password_hash: &str) -> StoreResult<i64>;

    /// Find user by exact email
    async fn find_user_by_email(&self, email: &str) -> StoreResult<User>;

    /// Admin flag of the user with this id
    async fn is_admin(&self, user_id: i64) -> StoreResult<bool>;

    /// Find application by id
    async fn find_app(&self, app_id: i32) -> StoreResult<App>;
}

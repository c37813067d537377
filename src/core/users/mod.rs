//! User store boundary
//!
//! The auth core never talks to a database directly; it consumes this trait.
//! Implementations must enforce email uniqueness atomically and treat the
//! email as a case-insensitive lookup key.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use memory::InMemoryUserStore;

/// A registered user as held by the backing store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Irreversible bcrypt digest; never the plain password
    pub hashed_password: String,
}

/// User store error types
#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("Email already exists")]
    EmailExists,

    #[error("User store unavailable: {0}")]
    Unavailable(String),
}

/// Backing store for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email (case-insensitive).
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Create a user, rejecting duplicate emails atomically.
    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, UserStoreError>;
}

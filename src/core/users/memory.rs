//! In-memory user store
//!
//! Reference implementation of [`UserStore`] backed by a concurrent map.
//! Keys are lowercased emails so lookups are case-insensitive; the map's
//! entry API makes duplicate registration races lose cleanly.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::core::users::{User, UserStore, UserStoreError};

/// Concurrent in-memory user store keyed by lowercased email.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let key = email.to_lowercase();
        Ok(self.users.get(&key).map(|entry| entry.value().clone()))
    }

    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, UserStoreError> {
        let key = email.to_lowercase();

        match self.users.entry(key) {
            Entry::Occupied(_) => Err(UserStoreError::EmailExists),
            Entry::Vacant(vacant) => {
                let user = User {
                    id: Uuid::new_v4(),
                    email: email.to_string(),
                    hashed_password: hashed_password.to_string(),
                };
                vacant.insert(user.clone());
                Ok(user)
            }
        }
    }
}

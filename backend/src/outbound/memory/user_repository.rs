//! In-memory `UserRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRecord, UserRepository};
use crate::domain::{PasswordHash, User, UserId};

/// Credential store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        let mut records = self.records.write().await;
        if records
            .values()
            .any(|record| record.user.username() == user.username())
        {
            return Err(UserPersistenceError::duplicate_username());
        }
        if records
            .values()
            .any(|record| record.user.email() == user.email())
        {
            return Err(UserPersistenceError::duplicate_email());
        }
        records.insert(
            *user.id(),
            UserRecord {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|record| record.user.username().as_str() == username)
            .cloned())
    }
}

//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PasswordHash, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the username.
        DuplicateUsername => "username already registered",
        /// Another account already uses the email address.
        DuplicateEmail => "email already registered",
    }
}

/// A user together with the credential hash stored for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Account identity.
    pub user: User,
    /// Stored password hash.
    pub password_hash: PasswordHash,
}

/// Port for the credential store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user in a single write. Fails without side effects when
    /// the username or email is taken.
    async fn create(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError>;

    /// Fetch a user and their hash by login name.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UserPersistenceError>;
}

//! Account domain service.
//!
//! Implements registration and login over the credential store and a
//! password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::info;

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, RegistrationService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Error, LoginCredentials, PasswordHash, Registration, User, UserId};

/// Message shown for every failed login, whichever field was wrong.
pub const LOGIN_FAILED_MESSAGE: &str = "Password or username is incorrect";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername => {
            Error::conflict("A user with the given username is already registered")
        }
        UserPersistenceError::DuplicateEmail => {
            Error::conflict("A user with the given email is already registered")
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Verified against when the username is unknown, so a miss costs as much
/// as a wrong password.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

/// Account service implementing the login and registration driving ports.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    decoy_hash: OnceCell<PasswordHash>,
}

impl<U, H> AccountService<U, H> {
    /// Create a new service over a user repository and password hasher.
    pub const fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            users,
            hasher,
            decoy_hash: OnceCell::const_new(),
        }
    }
}

impl<U, H> AccountService<U, H>
where
    H: PasswordHasher,
{
    /// Spend the same hashing work a real verification would.
    async fn verify_decoy(&self, password: &str) -> Result<(), Error> {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await
            .map_err(map_hasher_error)?;
        self.hasher
            .verify(password, decoy)
            .await
            .map_err(map_hasher_error)?;
        Ok(())
    }
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let user = registration.to_user(UserId::random());
        self.users
            .create(&user, &hash)
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id(), "account registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(record) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            self.verify_decoy(credentials.password()).await?;
            return Err(Error::unauthorized(LOGIN_FAILED_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::unauthorized(LOGIN_FAILED_MESSAGE));
        }

        info!(user_id = %record.user.id(), "login succeeded");
        Ok(record.user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;

//! Bcrypt-backed `PasswordHasher`.
//!
//! Hashing is CPU-bound, so each call runs on the blocking pool. The active
//! trace id is re-entered there so log lines stay correlated.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, TraceId};

/// Lowest cost accepted by bcrypt.
pub const MIN_COST: u32 = 4;
/// Highest cost accepted by bcrypt.
pub const MAX_COST: u32 = 31;

/// Password hasher using bcrypt with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given cost, clamped to bcrypt's valid range.
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    /// Work factor in use.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHasherError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, work),
        None => work(),
    })
    .await
    .map_err(|err| PasswordHasherError::hashing(err.to_string()))?
    .map_err(|err| PasswordHasherError::hashing(err.to_string()))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let cost = self.cost;
        let password = Zeroizing::new(password.to_owned());
        run_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map(PasswordHash::new)
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        run_blocking(move || bcrypt::verify(password.as_bytes(), &encoded)).await
    }
}

//! Builders for HTTP state over the chosen persistence backend.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::ports::{PasswordHasher, PostRepository, UserRepository};
use crate::domain::{AccountService, JournalService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
use crate::outbound::persistence::{DbPool, DieselPostRepository, DieselUserRepository};
use crate::outbound::security::BcryptPasswordHasher;

/// Where users and posts are stored.
#[derive(Clone)]
pub enum Persistence {
    /// Process memory; lost on restart.
    Memory,
    /// PostgreSQL through the shared pool.
    Postgres(DbPool),
}

impl Persistence {
    /// Short label for startup logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

fn assemble<U, P, H>(users: U, posts: P, hasher: H) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    H: PasswordHasher + 'static,
{
    let accounts = Arc::new(AccountService::new(Arc::new(users), Arc::new(hasher)));
    let journal = Arc::new(JournalService::new(Arc::new(posts), Arc::new(DefaultClock)));
    HttpState::new(accounts.clone(), accounts, journal.clone(), journal)
}

/// Wire the account and journal services over `persistence`.
#[must_use]
pub fn build_http_state(persistence: &Persistence, bcrypt_cost: u32) -> HttpState {
    let hasher = BcryptPasswordHasher::new(bcrypt_cost);
    match persistence {
        Persistence::Memory => assemble(
            InMemoryUserRepository::new(),
            InMemoryPostRepository::new(),
            hasher,
        ),
        Persistence::Postgres(pool) => assemble(
            DieselUserRepository::new(pool.clone()),
            DieselPostRepository::new(pool.clone()),
            hasher,
        ),
    }
}

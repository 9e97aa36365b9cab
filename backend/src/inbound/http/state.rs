//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, PostsCommand, PostsQuery, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
}

impl HttpState {
    /// Bundle the account and journal ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use journal::domain::{AccountService, JournalService};
    /// use journal::inbound::http::state::HttpState;
    /// use journal::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
    /// use journal::outbound::security::BcryptPasswordHasher;
    /// use mockable::DefaultClock;
    ///
    /// let accounts = Arc::new(AccountService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(BcryptPasswordHasher::default()),
    /// ));
    /// let journal = Arc::new(JournalService::new(
    ///     Arc::new(InMemoryPostRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(accounts.clone(), accounts, journal.clone(), journal);
    /// let _posts = state.posts.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        registration: Arc<dyn RegistrationService>,
        posts: Arc<dyn PostsCommand>,
        posts_query: Arc<dyn PostsQuery>,
    ) -> Self {
        Self {
            login,
            registration,
            posts,
            posts_query,
        }
    }
}

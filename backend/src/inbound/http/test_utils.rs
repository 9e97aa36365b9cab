//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

/// Session middleware with a fresh key and the `Secure` flag off for plain-HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response, owned so it can be replayed.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// The `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Handler state over fresh in-memory stores and a cheap bcrypt cost.
pub fn test_state() -> crate::inbound::http::state::HttpState {
    use std::sync::Arc;

    use crate::domain::{AccountService, JournalService};
    use crate::inbound::http::state::HttpState;
    use crate::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
    use crate::outbound::security::BcryptPasswordHasher;

    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::new(4)),
    ));
    let journal = Arc::new(JournalService::new(
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(mockable::DefaultClock),
    ));
    HttpState::new(accounts.clone(), accounts, journal.clone(), journal)
}

/// A browser stand-in that replays the latest session cookie.
#[derive(Default)]
pub struct Visitor {
    cookie: Option<Cookie<'static>>,
}

impl Visitor {
    /// Attach the remembered cookie, if any.
    pub fn prepare(&self, req: actix_web::test::TestRequest) -> actix_web::test::TestRequest {
        match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }

    /// Keep the cookie a response set, if it set one.
    pub fn remember<B>(&mut self, res: &ServiceResponse<B>) {
        if let Some(cookie) = session_cookie(res) {
            self.cookie = Some(cookie);
        }
    }
}

/// Read a response body as UTF-8.
pub async fn body_text<B: actix_web::body::MessageBody>(res: ServiceResponse<B>) -> String {
    let bytes = actix_web::test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).unwrap_or_default()
}

//! Shared harness for end-to-end journal flows.
//!
//! The app is the production [`build_app`] over in-memory stores, a cookie
//! session store and bcrypt cost 4.

use actix_session::storage::CookieSessionStore;
use actix_web::body::MessageBody;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;
use actix_web::http::header::LOCATION;
use actix_web::test::TestRequest;
use actix_web::web;

use journal::inbound::http::session_config::{SessionSettings, key_fingerprint};
use journal::server::{Persistence, SESSION_COOKIE_NAME, build_http_state, session_middleware};

pub use journal::server::build_app;

/// Settings for plain-HTTP tests: fresh key, no `Secure` flag.
pub fn test_session_settings() -> SessionSettings {
    let key = Key::generate();
    let fingerprint = key_fingerprint(&key);
    SessionSettings {
        key,
        cookie_secure: false,
        same_site: SameSite::Lax,
        ttl: Duration::days(7),
        fingerprint,
    }
}

/// Build the app pieces; callers pass them to `build_app`.
pub fn app_parts() -> (
    web::Data<journal::inbound::http::state::HttpState>,
    actix_session::SessionMiddleware<CookieSessionStore>,
) {
    let state = web::Data::new(build_http_state(&Persistence::Memory, 4));
    let session = session_middleware(CookieSessionStore::default(), &test_session_settings());
    (state, session)
}

/// Initialise the full application service.
macro_rules! journal_app {
    () => {{
        let (state, session) = $crate::support::app_parts();
        actix_web::test::init_service($crate::support::build_app(state, session)).await
    }};
}

/// A browser stand-in that replays the latest session cookie.
#[derive(Default)]
pub struct Visitor {
    cookie: Option<Cookie<'static>>,
}

impl Visitor {
    /// Attach the remembered cookie, if any.
    pub fn prepare(&self, req: TestRequest) -> TestRequest {
        match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }

    /// Keep the session cookie a response set, if it set one.
    pub fn remember<B>(&mut self, res: &ServiceResponse<B>) {
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        {
            self.cookie = Some(cookie.into_owned());
        }
    }
}

/// The `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Read a response body as UTF-8.
pub async fn body_text<B: MessageBody>(res: ServiceResponse<B>) -> String {
    let bytes = actix_web::test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

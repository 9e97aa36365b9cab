//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::JournalSettings;
pub use state_builders::{Persistence, build_http_state};

use std::net::SocketAddr;
use std::time::Duration;

use actix_session::config::{CookieContentSecurity, PersistentSession, TtlExtensionPolicy};
use actix_session::SessionMiddleware;
use actix_session::storage::{CookieSessionStore, RedisSessionStore, SessionStore};
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::Trace;
use crate::inbound::http::error_pages::ErrorPages;
use crate::inbound::http::method_override::MethodOverride;
use crate::inbound::http::routes::configure;
use crate::inbound::http::session_config::{BuildMode, SessionSettings};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Where session state lives between requests.
#[derive(Clone, Debug)]
pub enum SessionBackend {
    /// Entirely inside the encrypted cookie.
    Cookie,
    /// In Redis, keyed by the id in the cookie.
    Redis(String),
}

impl SessionBackend {
    /// Short label for startup logs. Never includes the URL.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cookie => "cookie",
            Self::Redis(_) => "redis",
        }
    }
}

/// Everything [`create_server`] needs.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) session_backend: SessionBackend,
    pub(crate) persistence: Persistence,
    pub(crate) bcrypt_cost: u32,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Resolve stores from `settings`, connecting and migrating as needed.
    ///
    /// Release builds refuse to start without a database and a Redis URL.
    /// Debug builds substitute in-memory stores and log that they did.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when a required URL is missing or the
    /// database cannot be prepared.
    pub async fn resolve(
        settings: &JournalSettings,
        session: SessionSettings,
        mode: BuildMode,
    ) -> std::io::Result<Self> {
        let persistence = match (&settings.database_url, mode) {
            (Some(url), _) => {
                run_pending_migrations(url)
                    .await
                    .map_err(|err| std::io::Error::other(err.to_string()))?;
                let pool = DbPool::new(
                    PoolConfig::new(url.clone())
                        .with_max_size(settings.db_max_connections)
                        .with_connection_timeout(Duration::from_secs(30)),
                )
                .await
                .map_err(|err| std::io::Error::other(err.into_message()))?;
                Persistence::Postgres(pool)
            }
            (None, BuildMode::Debug) => Persistence::Memory,
            (None, BuildMode::Release) => {
                return Err(std::io::Error::other(
                    "JOURNAL_DATABASE_URL is required in release builds",
                ));
            }
        };

        let session_backend = match (&settings.redis_url, mode) {
            (Some(url), _) => SessionBackend::Redis(url.clone()),
            (None, BuildMode::Debug) => SessionBackend::Cookie,
            (None, BuildMode::Release) => {
                return Err(std::io::Error::other(
                    "JOURNAL_REDIS_URL is required in release builds",
                ));
            }
        };

        Ok(Self {
            session,
            session_backend,
            persistence,
            bcrypt_cost: settings.bcrypt_cost,
            bind_addr: settings.bind_addr(),
        })
    }
}

/// Session middleware over `store` with the configured cookie policy.
pub fn session_middleware<S: SessionStore>(
    store: S,
    settings: &SessionSettings,
) -> SessionMiddleware<S> {
    SessionMiddleware::builder(store, settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(settings.ttl)
                .session_ttl_extension_policy(TtlExtensionPolicy::OnEveryRequest),
        )
        .build()
}

/// The full application: routes, session, error pages and tracing.
///
/// Wrap order, innermost first: session, error pages, method override,
/// trace. Method override runs before routing so the rewritten method is
/// the one matched.
pub fn build_app<S>(
    state: web::Data<HttpState>,
    session: SessionMiddleware<S>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: SessionStore + 'static,
{
    App::new()
        .app_data(state)
        .wrap(session)
        .wrap(ErrorPages)
        .wrap(MethodOverride)
        .wrap(Trace)
        .configure(configure)
}

/// Construct the HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding fails or the Redis session
/// store cannot be reached.
pub async fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        session_backend,
        persistence,
        bcrypt_cost,
        bind_addr,
    } = config;
    let state = web::Data::new(build_http_state(&persistence, bcrypt_cost));

    info!(
        %bind_addr,
        key_fingerprint = %session.fingerprint,
        store = persistence.label(),
        sessions = session_backend.label(),
        "starting journal server"
    );

    let server = match session_backend {
        SessionBackend::Cookie => HttpServer::new(move || {
            build_app(
                state.clone(),
                session_middleware(CookieSessionStore::default(), &session),
            )
        })
        .bind(bind_addr)?
        .run(),
        SessionBackend::Redis(url) => {
            let store = RedisSessionStore::new(url)
                .await
                .map_err(|err| std::io::Error::other(format!("redis session store: {err}")))?;
            HttpServer::new(move || {
                build_app(state.clone(), session_middleware(store.clone(), &session))
            })
            .bind(bind_addr)?
            .run()
        }
    };
    Ok(server)
}

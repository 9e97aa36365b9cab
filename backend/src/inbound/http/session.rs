//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal in domain terms: who is signed
//! in, where to go after login, and which flash messages are pending.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Error, User, UserId};
use crate::inbound::http::flash::{FLASH_KEY, FlashLevel, FlashMessage};
use crate::inbound::http::views::PageContext;

pub(crate) const USER_KEY: &str = "user";
pub(crate) const RETURN_TO_KEY: &str = "returnTo";

/// Identity stored in the session once a user signs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Account identifier; every post lookup is scoped by it.
    pub id: UserId,
    /// Login name, for display.
    pub username: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            username: user.username().as_str().to_owned(),
        }
    }
}

/// Only same-site absolute paths are honoured as post-login targets.
pub(crate) fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Attach `user` to the session under a fresh session id.
    pub fn persist_user(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_KEY, SessionUser::from(user))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in user, if any. Unreadable identities count as signed out.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        match self.0.get::<SessionUser>(USER_KEY) {
            Ok(user) => user,
            Err(error) => {
                warn!(%error, "invalid user in session; treating as signed out");
                self.0.remove(USER_KEY);
                None
            }
        }
    }

    /// Drop the signed-in identity and rotate the session id. Pending flashes survive.
    pub fn forget_user(&self) {
        self.0.remove(USER_KEY);
        self.0.remove(RETURN_TO_KEY);
        self.0.renew();
    }

    /// Remember where an unauthenticated visitor was heading.
    pub fn set_return_to(&self, path: &str) -> Result<(), Error> {
        if !is_local_path(path) {
            return Ok(());
        }
        self.0
            .insert(RETURN_TO_KEY, path)
            .map_err(|error| Error::internal(format!("failed to store return path: {error}")))
    }

    /// Take and clear the remembered path. Non-local values are discarded.
    pub fn take_return_to(&self) -> Option<String> {
        match self.0.remove_as::<String>(RETURN_TO_KEY) {
            Some(Ok(path)) if is_local_path(&path) => Some(path),
            Some(Ok(path)) => {
                warn!(%path, "discarding non-local return path");
                None
            }
            Some(Err(raw)) => {
                warn!(%raw, "discarding unreadable return path");
                None
            }
            None => None,
        }
    }

    /// Queue a flash message for the next rendered page.
    pub fn flash(&self, level: FlashLevel, message: impl Into<String>) -> Result<(), Error> {
        let mut queued = self
            .0
            .get::<Vec<FlashMessage>>(FLASH_KEY)
            .unwrap_or_else(|error| {
                warn!(%error, "discarding unreadable flash messages");
                None
            })
            .unwrap_or_default();
        queued.push(FlashMessage::new(level, message));
        self.0
            .insert(FLASH_KEY, queued)
            .map_err(|error| Error::internal(format!("failed to store flash message: {error}")))
    }

    /// Take and clear all pending flash messages.
    pub fn take_flashes(&self) -> Vec<FlashMessage> {
        match self.0.remove_as::<Vec<FlashMessage>>(FLASH_KEY) {
            Some(Ok(messages)) => messages,
            Some(Err(raw)) => {
                warn!(%raw, "discarding unreadable flash messages");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Build the context for rendering a page, consuming pending flashes.
    #[must_use]
    pub fn page_context(&self) -> PageContext {
        PageContext {
            user: self.user(),
            flashes: self.take_flashes(),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}

#[cfg(test)]
mod tests;

//! Login gate for signed-in routes.
//!
//! The gate decides before the wrapped service is touched: either the request
//! continues with a known [`SessionUser`], or it halts with a redirect and the
//! inner service is never called.

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::LOCATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::Error;
use crate::inbound::http::flash::FlashLevel;
use crate::inbound::http::session::{SessionContext, SessionUser};

/// Flash shown when a visitor hits a signed-in route.
pub const SIGN_IN_REQUIRED_MESSAGE: &str = "You must be signed in first!";

/// Where halted requests are sent.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of checking a request for a signed-in identity.
#[derive(Debug)]
pub enum Gate {
    /// Hand the request to the wrapped service.
    Continue(SessionUser),
    /// Answer with this response and stop.
    Halt(HttpResponse),
}

/// Decide whether `req` may proceed.
///
/// Halting records the requested path and query as `returnTo` and queues an
/// error flash before answering `302 /login`.
pub fn gate(req: &ServiceRequest) -> Gate {
    let session = SessionContext::new(req.get_session());
    if let Some(user) = session.user() {
        return Gate::Continue(user);
    }

    let target = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
    debug!(path = %target, "sign-in required");
    let recorded = session
        .set_return_to(&target)
        .and_then(|()| session.flash(FlashLevel::Error, SIGN_IN_REQUIRED_MESSAGE));
    match recorded {
        Ok(()) => Gate::Halt(
            HttpResponse::Found()
                .insert_header((LOCATION, LOGIN_PATH))
                .finish(),
        ),
        Err(error) => Gate::Halt(error.error_response()),
    }
}

/// Middleware applying [`gate`] to every request of the wrapped resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireLogin;

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireLoginMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireLogin`].
pub struct RequireLoginMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireLoginMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match gate(&req) {
            Gate::Continue(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Gate::Halt(response) => {
                let res = req.into_response(response).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

/// Handlers behind [`RequireLogin`] take the gated identity as an argument.
impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionUser>()
                .cloned()
                .ok_or_else(|| Error::unauthorized(SIGN_IN_REQUIRED_MESSAGE)),
        )
    }
}

//! Lets HTML forms reach PUT, PATCH and DELETE routes.
//!
//! Browsers only submit GET and POST. A POST carrying `_method=PUT` (or
//! `PATCH`/`DELETE`) in its query string is rewritten before routing. Other
//! methods and overrides are left untouched.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{Ready, ready};
use tracing::debug;

/// Query parameter naming the intended method.
pub const OVERRIDE_PARAM: &str = "_method";

/// The method a POST asked to be treated as, if it is one we honour.
pub(crate) fn requested_override(query: &str) -> Option<Method> {
    let (_, value) = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == OVERRIDE_PARAM)?;
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Middleware rewriting overridden POSTs. Must wrap the app, not a resource,
/// so the new method is seen by the router.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

/// Service wrapper produced by [`MethodOverride`].
pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = requested_override(req.query_string()) {
                debug!(%method, path = req.path(), "method override");
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}

//! Error pages for failures that never reach a handler.
//!
//! Domain errors already render HTML through [`ResponseError`]. This layer
//! catches the rest: router 404s, extractor rejections, session store
//! failures, and anything else that would otherwise leave as a bare status.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, HeaderMap};
use actix_web::{Error, HttpResponse, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::TraceId;
use crate::inbound::http::error::{GENERIC_ERROR_MESSAGE, error_page};

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"))
}

fn public_message(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        GENERIC_ERROR_MESSAGE
    } else {
        status.canonical_reason().unwrap_or(GENERIC_ERROR_MESSAGE)
    }
}

fn page_for(status: StatusCode) -> HttpResponse {
    let trace_id = TraceId::current().map(|id| id.to_string());
    error_page(status, public_message(status), trace_id.as_deref())
}

/// A failure raised below this layer, re-rendered as an error page.
///
/// The dispatcher renders it after the request scope has ended, so the trace
/// identifier is captured when the failure is seen.
#[derive(Debug, thiserror::Error)]
#[error("{status}")]
struct PageError {
    status: StatusCode,
    trace_id: Option<String>,
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        error_page(self.status, public_message(self.status), self.trace_id.as_deref())
    }
}

/// Middleware turning non-HTML error responses into error pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPages;

impl<S, B> Transform<S, ServiceRequest> for ErrorPages
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorPagesMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorPagesMiddleware { service }))
    }
}

/// Service wrapper produced by [`ErrorPages`].
pub struct ErrorPagesMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorPagesMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(res) if res.status().is_success() || res.status().is_redirection() => {
                    Ok(res.map_into_left_body())
                }
                Ok(res) if is_html(res.headers()) => Ok(res.map_into_left_body()),
                Ok(res) => {
                    let page = page_for(res.status());
                    Ok(res.into_response(page).map_into_right_body())
                }
                Err(err) => {
                    let status = err.error_response().status();
                    error!(error = %err, %status, "middleware failed");
                    let trace_id = TraceId::current().map(|id| id.to_string());
                    Err(PageError { status, trace_id }.into())
                }
            }
        })
    }
}

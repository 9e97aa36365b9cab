//! HTTP adapter mapping for domain errors.
//!
//! Every handler returns `Result<_, Error>`, so failures raised before or
//! after an `.await` reach this single boundary and render the error page.

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::views::{Page, PageContext};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message shown when an error has nothing safe to say.
pub const GENERIC_ERROR_MESSAGE: &str = "Oh No, Something Went Wrong!";

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Text safe to show the visitor.
fn public_message(error: &Error) -> &str {
    if error.code().is_server_fault() || error.message().trim().is_empty() {
        GENERIC_ERROR_MESSAGE
    } else {
        error.message()
    }
}

/// Render the error page for `status` with the given public message.
pub(crate) fn error_page(status: StatusCode, message: &str, trace_id: Option<&str>) -> HttpResponse {
    let mut response = Page::Error {
        status,
        message,
        trace_id,
    }
    .respond(status, &PageContext::anonymous());
    if let Some(value) = trace_id.and_then(|id| HeaderValue::from_str(id).ok()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
    }
    response
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), message = self.message(), trace_id = ?self.trace_id(), "request failed");
        } else {
            debug!(code = ?self.code(), message = self.message(), trace_id = ?self.trace_id(), "request rejected");
        }
        error_page(status, public_message(self), self.trace_id())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Keep framework internals out of the page.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(err.to_string())
    }
}

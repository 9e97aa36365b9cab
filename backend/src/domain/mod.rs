//! Domain primitives, ports and services.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`User`], [`Username`], [`EmailAddress`], [`UserId`]: account identity.
//! - [`Registration`], [`LoginCredentials`], [`PasswordHash`]: credential inputs.
//! - [`Post`], [`PostDraft`], [`PostId`]: journal entries.
//! - [`AccountService`], [`JournalService`]: implementations of the driving ports.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod journal_service;
pub mod ports;
pub mod post;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, LOGIN_FAILED_MESSAGE};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX_BYTES, PasswordHash, Registration,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::journal_service::{JournalService, POST_NOT_FOUND_MESSAGE};
pub use self::post::{Post, PostDraft, PostId, PostValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, User, UserId, UserValidationError, Username};

/// Convenient result alias for handlers and services.
pub type ApiResult<T> = Result<T, Error>;

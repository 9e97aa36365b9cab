//! Authentication primitives: login credentials, registration input and
//! stored password hashes.
//!
//! Handlers pass raw form strings to these constructors; services only ever
//! see validated values. Plain-text passwords are wiped on drop.

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, User, UserId, UserValidationError, Username};

/// Longest password accepted, in bytes. Bcrypt ignores anything past this.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim, whitespace included.
///
/// # Examples
/// ```
/// use journal::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "pw123").expect("valid");
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "pw123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when registration input is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username or email failed validation.
    User(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password exceeded [`PASSWORD_MAX_BYTES`].
    PasswordTooLong {
        /// Maximum permitted length in bytes.
        max: usize,
    },
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(inner) => inner.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} bytes")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Validated sign-up request.
///
/// # Examples
/// ```
/// use journal::domain::{Registration, UserId};
///
/// let reg = Registration::try_from_parts("Alice@X.com", "alice", "pw123").expect("valid");
/// let user = reg.to_user(UserId::random());
/// assert_eq!(user.email().as_str(), "alice@x.com");
/// assert_eq!(reg.password(), "pw123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: EmailAddress,
    username: Username,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration form values.
    pub fn try_from_parts(
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let email = EmailAddress::new(email)?;
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(RegistrationValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES,
            });
        }
        Ok(Self {
            email,
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password to hash.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Build the user record this registration would create.
    #[must_use]
    pub fn to_user(&self, id: UserId) -> User {
        User::new(id, self.username.clone(), self.email.clone())
    }
}

/// Opaque password hash as produced by a
/// [`PasswordHasher`](super::ports::PasswordHasher).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

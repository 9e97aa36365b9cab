//! Session cookie settings read from the environment.
//!
//! Every toggle follows one rule: a release build refuses a missing or
//! unreadable value, a debug build logs a warning and uses the fallback.

use std::path::PathBuf;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Shortest key file a release build accepts.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Sessions live for a week and the clock restarts on every request.
pub const SESSION_TTL_DAYS: i64 = 7;

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const FINGERPRINT_BYTES: usize = 8;

/// Whether configuration problems are fatal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Warn and fall back.
    Debug,
    /// Refuse to start.
    Release,
}

impl BuildMode {
    /// The mode matching `cfg!(debug_assertions)`.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated session cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Cookie encryption and signing key.
    pub key: Key,
    /// Whether the cookie carries `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy.
    pub same_site: SameSite,
    /// Session lifetime, refreshed on activity.
    pub ttl: Duration,
    /// Short hash identifying the active key in logs.
    pub fingerprint: String,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Reads toggles from an [`Env`] under a [`BuildMode`].
struct Toggles<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Toggles<'_, E> {
    /// Release builds get `error`; debug builds get `fallback` and a warning.
    fn tolerate<T>(
        &self,
        error: SessionConfigError,
        fallback: T,
    ) -> Result<T, SessionConfigError> {
        match self.mode {
            BuildMode::Release => Err(error),
            BuildMode::Debug => {
                warn!(%error, "session setting ignored in debug build");
                Ok(fallback)
            }
        }
    }

    fn read<T>(
        &self,
        name: &'static str,
        expected: &'static str,
        fallback: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            return self.tolerate(SessionConfigError::MissingEnv { name }, fallback);
        };
        match parse(&value) {
            Some(parsed) => Ok(parsed),
            None => self.tolerate(
                SessionConfigError::InvalidEnv {
                    name,
                    value,
                    expected,
                },
                fallback,
            ),
        }
    }
}

/// Build session settings from the environment.
///
/// # Examples
///
/// ```rust
/// use journal::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_COOKIE_SECURE" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug tolerates gaps");
/// assert!(!settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let toggles = Toggles { env, mode };
    let cookie_secure = toggles.read(COOKIE_SECURE_ENV, BOOL_EXPECTED, true, parse_bool)?;

    let fallback_same_site = match mode {
        BuildMode::Debug => SameSite::Lax,
        BuildMode::Release => SameSite::Strict,
    };
    let mut same_site =
        toggles.read(SAMESITE_ENV, SAMESITE_EXPECTED, fallback_same_site, parse_same_site)?;
    if same_site == SameSite::None && !cookie_secure {
        same_site = toggles.tolerate(SessionConfigError::InsecureSameSiteNone, SameSite::None)?;
    }

    let allow_ephemeral = toggles.read(ALLOW_EPHEMERAL_ENV, BOOL_EXPECTED, false, parse_bool)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }

    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| KEY_DEFAULT_PATH.to_owned()),
    );
    let key = load_key(&toggles, path, allow_ephemeral)?;
    let fingerprint = key_fingerprint(&key);

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl: Duration::days(SESSION_TTL_DAYS),
        fingerprint,
    })
}

fn load_key<E: Env>(
    toggles: &Toggles<'_, E>,
    path: PathBuf,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    match std::fs::read(&path).map(Zeroizing::new) {
        Ok(bytes) if bytes.len() < SESSION_KEY_MIN_LEN => toggles.tolerate(
            SessionConfigError::KeyTooShort {
                path,
                length: bytes.len(),
                min_len: SESSION_KEY_MIN_LEN,
            },
            Key::generate(),
        ),
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(source) if toggles.mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

/// First eight bytes of the SHA-256 of the signing key, hex encoded.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

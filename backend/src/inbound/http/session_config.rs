//! Session cookie configuration read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning. Release
//! builds require every toggle to be set explicitly and reject unsafe
//! combinations.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
pub(crate) const TTL_ENV: &str = "SESSION_TTL_SECS";

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key file length accepted by release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Session lifetime when `SESSION_TTL_SECS` is unset.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 2 * 60 * 60;

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const TTL_EXPECTED: &str = "a positive number of seconds";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates missing or invalid toggles.
    Debug,
    /// Requires explicit, valid toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use car_rental::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated session cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for the private cookie.
    pub key: Key,
    /// Whether the cookie is marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for the cookie.
    pub same_site: SameSite,
    /// Lifetime of the persistent session cookie in seconds.
    pub ttl_secs: i64,
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

/// One environment toggle: how to parse it and what debug builds fall back to.
struct Toggle<T> {
    name: &'static str,
    expected: &'static str,
    parse: fn(&str) -> Option<T>,
    debug_default: T,
}

impl<T: Copy> Toggle<T> {
    /// Release builds turn a missing or malformed value into an error; debug
    /// builds warn and use `debug_default`.
    fn read<E: Env>(&self, env: &E, mode: BuildMode) -> Result<T, SessionConfigError> {
        let Some(value) = env.string(self.name) else {
            if mode.is_debug() {
                warn!(name = self.name, "session toggle not set; using default");
                return Ok(self.debug_default);
            }
            return Err(SessionConfigError::MissingEnv { name: self.name });
        };
        match (self.parse)(&value) {
            Some(parsed) => Ok(parsed),
            None if mode.is_debug() => {
                warn!(name = self.name, value = %value, "invalid session toggle; using default");
                Ok(self.debug_default)
            }
            None => Err(SessionConfigError::InvalidEnv {
                name: self.name,
                value,
                expected: self.expected,
            }),
        }
    }
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use car_rental::inbound::http::session_config::{session_settings_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("car_rental_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let key_path = key_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(key_path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.ttl_secs, 7200);
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = Toggle {
        name: COOKIE_SECURE_ENV,
        expected: BOOL_EXPECTED,
        parse: parse_bool,
        debug_default: true,
    }
    .read(env, mode)?;

    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let same_site = Toggle {
        name: SAMESITE_ENV,
        expected: SAMESITE_EXPECTED,
        parse: parse_same_site,
        debug_default: default_same_site,
    }
    .read(env, mode)?;
    if same_site == SameSite::None && !cookie_secure {
        if !mode.is_debug() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SESSION_SAMESITE=None without a secure cookie; browsers may reject it");
    }

    let allow_ephemeral = Toggle {
        name: ALLOW_EPHEMERAL_ENV,
        expected: BOOL_EXPECTED,
        parse: parse_bool,
        debug_default: false,
    }
    .read(env, mode)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }

    let ttl_secs = ttl_from_env(env)?;
    let key = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl_secs,
    })
}

/// The TTL is optional in every build mode; a present but bad value is an
/// error.
fn ttl_from_env<E: Env>(env: &E) -> Result<i64, SessionConfigError> {
    let Some(value) = env.string(TTL_ENV) else {
        return Ok(DEFAULT_SESSION_TTL_SECS);
    };
    match value.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(SessionConfigError::InvalidEnv {
            name: TTL_ENV,
            value,
            expected: TTL_EXPECTED,
        }),
    }
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key; sessions will not survive a restart"
            );
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
        bytes.zeroize();
        return Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
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

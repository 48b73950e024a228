//! Session cookie settings read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning so local
//! development works without any setup. Release builds refuse to start when a
//! value is missing or malformed.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

pub const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const DEFAULT_KEY_FILE: &str = "/var/run/secrets/session_key";
/// Minimum key material accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Whether the binary was built with debug assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
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

/// Resolved session cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("key", &"<redacted>")
            .field("cookie_secure", &self.cookie_secure)
            .field("same_site", &self.same_site)
            .finish()
    }
}

/// Reasons session settings could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("{name} must be set in release builds")]
    MissingEnv { name: &'static str },
    #[error("{name} has invalid value {value:?}; expected {expected}")]
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
    #[error("session key at {path} must be at least {min} bytes, found {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min: usize,
    },
    #[error("SameSite=None requires {COOKIE_SECURE_ENV}=1")]
    InsecureSameSiteNone,
    #[error("{ALLOW_EPHEMERAL_ENV} must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Resolve session settings from `env`.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = flag(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = flag(env, mode, ALLOW_EPHEMERAL_ENV, mode.is_debug())?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Return `fallback` with a warning in debug builds, else `error`.
fn lenient<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn!(%error, "using development session default");
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn flag<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    match env.string(name) {
        None => lenient(mode, debug_default, SessionConfigError::MissingEnv { name }),
        Some(raw) => match parse_bool(&raw) {
            Some(value) => Ok(value),
            None => lenient(
                mode,
                debug_default,
                SessionConfigError::InvalidEnv {
                    name,
                    value: raw,
                    expected: "a boolean such as 1 or 0",
                },
            ),
        },
    }
}

fn same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let parsed = match env.string(SAMESITE_ENV) {
        None => lenient(
            mode,
            SameSite::Lax,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
        )?,
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "lax" => SameSite::Lax,
            "none" => SameSite::None,
            _ => lenient(
                mode,
                SameSite::Lax,
                SessionConfigError::InvalidEnv {
                    name: SAMESITE_ENV,
                    value: raw,
                    expected: "Strict, Lax or None",
                },
            )?,
        },
    };
    if parsed == SameSite::None && !cookie_secure {
        return lenient(mode, SameSite::Lax, SessionConfigError::InsecureSameSiteNone);
    }
    Ok(parsed)
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_KEY_FILE.to_owned()),
    );
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(source) if allow_ephemeral => {
            warn!(path = %path.display(), %source, "using ephemeral session key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };
    if bytes.len() < SESSION_KEY_MIN_LEN {
        if mode.is_debug() {
            warn!(
                path = %path.display(),
                length = bytes.len(),
                "session key too short; using an ephemeral key"
            );
            return Ok(Key::generate());
        }
        return Err(SessionConfigError::KeyTooShort {
            path,
            length: bytes.len(),
            min: SESSION_KEY_MIN_LEN,
        });
    }
    Ok(Key::derive_from(&bytes))
}

#[cfg(test)]
#[path = "session_config_tests.rs"]
mod tests;

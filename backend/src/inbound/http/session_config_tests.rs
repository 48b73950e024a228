//! Tests for environment-driven session settings.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use uuid::Uuid;

struct KeyFile(PathBuf);

impl KeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("travel-orders-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        Self(path)
    }

    fn path(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn env_with(pairs: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[rstest]
fn release_accepts_complete_configuration() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let path = key.path();
    let env = env_with(&[
        (KEY_FILE_ENV, &path),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);
    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn release_requires_cookie_secure() {
    let env = env_with(&[]);
    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("missing flag");
    assert!(matches!(
        err,
        SessionConfigError::MissingEnv {
            name: COOKIE_SECURE_ENV
        }
    ));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_rejects_malformed_booleans(#[case] raw: &str) {
    let env = env_with(&[(COOKIE_SECURE_ENV, raw)]);
    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("bad flag");
    assert!(matches!(err, SessionConfigError::InvalidEnv { .. }));
}

#[rstest]
fn same_site_none_requires_secure_cookies() {
    let env = env_with(&[(COOKIE_SECURE_ENV, "0"), (SAMESITE_ENV, "None")]);
    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("insecure none");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let env = env_with(&[
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "1"),
    ]);
    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("ephemeral");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN - 1);
    let path = key.path();
    let env = env_with(&[
        (KEY_FILE_ENV, &path),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);
    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("short key");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, min, .. }
            if length == SESSION_KEY_MIN_LEN - 1 && min == SESSION_KEY_MIN_LEN
    ));
}

#[rstest]
fn release_reports_unreadable_key_file() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/travel-orders/session_key"),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);
    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("missing key");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_development_defaults() {
    let env = env_with(&[(KEY_FILE_ENV, "/nonexistent/travel-orders/session_key")]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_downgrades_insecure_same_site_none() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/travel-orders/session_key"),
        (COOKIE_SECURE_ENV, "false"),
        (SAMESITE_ENV, "none"),
    ]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug fallback");
    assert!(!settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("1", Some(true))]
#[case(" YES ", Some(true))]
#[case("off", Some(false))]
#[case("2", None)]
fn parses_boolean_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

#[rstest]
fn debug_output_redacts_the_key() {
    let settings = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    assert!(format!("{settings:?}").contains("<redacted>"));
}

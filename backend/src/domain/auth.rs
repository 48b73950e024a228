//! Authentication primitives: login credentials and the acting principal.
//!
//! Inbound adapters validate raw strings through these constructors before
//! calling a port, and pass the resolved [`Principal`] explicitly into every
//! travel order operation.

use zeroize::Zeroizing;

use super::UserId;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use travel_orders::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "password").unwrap();
/// assert_eq!(creds.username(), "alice");
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
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// The authenticated caller of a travel order operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
}

impl Principal {
    /// Wrap the identifier resolved from the caller's session.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Identifier of the acting user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Whether this principal is `owner`.
    pub fn is(&self, owner: &UserId) -> bool {
        &self.user_id == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("bob", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("alice", " pass ").expect("valid inputs");
        assert_eq!(creds.password(), " pass ");
    }

    #[rstest]
    fn principal_recognises_its_own_id() {
        let me = UserId::random();
        let principal = Principal::new(me.clone());
        assert!(principal.is(&me));
        assert!(!principal.is(&UserId::random()));
    }
}

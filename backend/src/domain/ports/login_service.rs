//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing infrastructure, so handler tests can substitute a test double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development accounts recognised by [`FixtureLoginService`].
pub const FIXTURE_ACCOUNTS: [(&str, &str); 2] = [
    ("alice", "11111111-1111-4111-8111-111111111111"),
    ("bob", "22222222-2222-4222-8222-222222222222"),
];

/// Password shared by every fixture account.
pub const FIXTURE_PASSWORD: &str = "password";

/// In-memory authenticator for development and tests.
///
/// Two accounts with fixed ids let owner isolation be exercised end to end.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = FIXTURE_ACCOUNTS
            .iter()
            .find(|(username, _)| *username == credentials.username());
        match account {
            Some((_, id)) if credentials.password() == FIXTURE_PASSWORD => UserId::new(id)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}"))),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

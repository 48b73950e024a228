//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use chrono::NaiveDate;

use crate::domain::ports::FixtureLoginService;
use crate::domain::{TravelOrderService, TravelOrderSettings};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryTravelOrderRepository;
use crate::test_support::{MutableClock, RecordingNotifier};

/// Session middleware with a fresh key, cookie name `session` and the
/// `Secure` flag off for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over an empty in-memory store.
pub struct TestState {
    pub state: HttpState,
    pub repo: Arc<InMemoryTravelOrderRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<MutableClock>,
}

impl Default for TestState {
    fn default() -> Self {
        Self::new()
    }
}

impl TestState {
    /// Clock pinned to 2025-03-01 with default service settings.
    pub fn new() -> Self {
        Self::with_settings(TravelOrderSettings::default())
    }

    pub fn with_settings(settings: TravelOrderSettings) -> Self {
        let repo = Arc::new(InMemoryTravelOrderRepository::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        let clock = Arc::new(MutableClock::on(today));
        let service = Arc::new(
            TravelOrderService::new(repo.clone(), notifier.clone(), clock.clone())
                .with_settings(settings),
        );
        Self {
            state: HttpState::new(Arc::new(FixtureLoginService), service.clone(), service),
            repo,
            notifier,
            clock,
        }
    }
}

/// Log `username` in with the fixture password and return the session cookie.
pub async fn login_cookie<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({ "username": username, "password": "password" }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

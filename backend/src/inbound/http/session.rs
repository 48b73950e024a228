//! Cookie session access for handlers.
//!
//! Handlers never touch the Actix session directly: they log a user in with
//! [`SessionContext::persist_user`] and resolve the acting [`Principal`] with
//! [`SessionContext::require_principal`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Principal, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Domain-facing view of the caller's session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `user_id` as the authenticated user, rotating the session id.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The stored user id. Tampered or malformed values count as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match UserId::new(&raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "ignoring invalid user id in session cookie");
                None
            }
        }))
    }

    /// The authenticated caller, or `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Principal, Error> {
        self.user_id()?
            .map(Principal::new)
            .ok_or_else(|| Error::unauthorized("Unauthenticated."))
    }

    /// Forget the authenticated user.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const ALICE: &str = "11111111-1111-4111-8111-111111111111";

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let principal = session.require_principal()?;
        Ok(HttpResponse::Ok().body(principal.user_id().to_string()))
    }

    async fn login(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = UserId::new(ALICE).map_err(|err| Error::internal(err.to_string()))?;
        session.persist_user(&id)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn logout(session: SessionContext) -> HttpResponse {
        session.purge();
        HttpResponse::NoContent().finish()
    }

    macro_rules! session_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(test_session_middleware())
                    .route("/login", web::post().to(login))
                    .route("/logout", web::post().to(logout))
                    .route("/whoami", web::get().to(whoami))
                    .route(
                        "/tamper",
                        web::post().to(|session: Session| async move {
                            session
                                .insert(USER_ID_KEY, "not-a-uuid")
                                .expect("insert tampered id");
                            HttpResponse::Ok().finish()
                        }),
                    ),
            )
            .await
        };
    }

    fn session_cookie(
        res: &actix_web::dev::ServiceResponse,
    ) -> actix_web::cookie::Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie set")
    }

    #[actix_web::test]
    async fn persisted_user_becomes_the_principal() {
        let app = session_app!();
        let res = test::call_service(&app, test::TestRequest::post().uri("/login").to_request())
            .await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, ALICE);
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorised() {
        let app = session_app!();
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised() {
        let app = session_app!();
        let res = test::call_service(&app, test::TestRequest::post().uri("/tamper").to_request())
            .await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn purge_expires_the_cookie() {
        let app = session_app!();
        let res = test::call_service(&app, test::TestRequest::post().uri("/login").to_request())
            .await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let removal = session_cookie(&res);
        assert_eq!(removal.value(), "");
    }
}

//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] registers every handler path, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the session cookie security scheme.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it.

use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::schemas::{
    ConflictsEnvelopeSchema, ErrorCodeSchema, TravelOrderEnvelopeSchema,
    TravelOrderListEnvelopeSchema, TravelOrderSchema, TravelOrderStatusSchema,
};
use crate::inbound::http::travel_orders::{CreateTravelOrderBody, TransitionTravelOrderBody};
use crate::inbound::http::users::{LoginRequest, LoginResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default)
            .add_security_scheme(
                "SessionCookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "session",
                    "Session cookie issued by POST /api/v1/login.",
                ))),
            );
    }
}

/// OpenAPI document for the travel orders API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Travel orders API",
        description = "Book, review, approve and cancel corporate travel orders."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::travel_orders::list_travel_orders,
        crate::inbound::http::travel_orders::create_travel_order,
        crate::inbound::http::travel_orders::find_travel_order_conflicts,
        crate::inbound::http::travel_orders::show_travel_order,
        crate::inbound::http::travel_orders::transition_travel_order,
        crate::inbound::http::travel_orders::delete_travel_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelope,
        ErrorCodeSchema,
        TravelOrderSchema,
        TravelOrderStatusSchema,
        TravelOrderEnvelopeSchema,
        TravelOrderListEnvelopeSchema,
        ConflictsEnvelopeSchema,
        CreateTravelOrderBody,
        TransitionTravelOrderBody,
        LoginRequest,
        LoginResponse,
    )),
    tags(
        (name = "users", description = "Session login and logout"),
        (name = "travel-orders", description = "Travel order lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

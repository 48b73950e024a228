//! OpenAPI schema definitions for domain and envelope types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; the
//! wrappers here mirror their wire shape for documentation only.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa during OpenAPI generation"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested status change is not allowed from the current status.
    #[schema(rename = "invalid_transition")]
    InvalidTransition,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The booking overlaps an active order.
    #[schema(rename = "conflict")]
    Conflict,
    /// The backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Lifecycle status of a travel order.
#[derive(ToSchema)]
#[schema(as = TravelOrderStatus)]
pub enum TravelOrderStatusSchema {
    #[schema(rename = "requested")]
    Requested,
    #[schema(rename = "approved")]
    Approved,
    #[schema(rename = "cancelled")]
    Cancelled,
}

/// A booked trip.
#[derive(ToSchema)]
#[schema(as = TravelOrder)]
#[schema(rename_all = "camelCase")]
pub struct TravelOrderSchema {
    #[schema(value_type = String, format = "uuid")]
    id: String,
    #[schema(value_type = String, format = "uuid")]
    owner_id: String,
    #[schema(example = "Paris")]
    destination: String,
    #[schema(value_type = String, format = "date", example = "2025-06-01")]
    departure_date: String,
    #[schema(value_type = String, format = "date", example = "2025-06-08")]
    return_date: String,
    status: TravelOrderStatusSchema,
    #[schema(value_type = String, format = "date-time")]
    created_at: String,
    #[schema(value_type = String, format = "date-time")]
    updated_at: String,
}

/// `{"travelOrder": {...}}`
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TravelOrderDataSchema {
    travel_order: TravelOrderSchema,
}

/// Success envelope around a single order.
#[derive(ToSchema)]
pub struct TravelOrderEnvelopeSchema {
    #[schema(example = "success")]
    status: String,
    data: TravelOrderDataSchema,
}

/// Navigation links of a list page.
#[derive(ToSchema)]
pub struct PageLinksSchema {
    first: String,
    last: String,
    prev: Option<String>,
    next: Option<String>,
}

/// One page of orders.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TravelOrderPageSchema {
    data: Vec<TravelOrderSchema>,
    current_page: u32,
    per_page: u32,
    total: u64,
    last_page: u32,
    links: PageLinksSchema,
}

/// `{"travelOrders": {...}}`
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TravelOrderListDataSchema {
    travel_orders: TravelOrderPageSchema,
}

/// Success envelope around a page of orders.
#[derive(ToSchema)]
pub struct TravelOrderListEnvelopeSchema {
    #[schema(example = "success")]
    status: String,
    data: TravelOrderListDataSchema,
}

/// `{"conflicts": [...]}`
#[derive(ToSchema)]
pub struct ConflictsDataSchema {
    conflicts: Vec<TravelOrderSchema>,
}

/// Success envelope around conflicting orders.
#[derive(ToSchema)]
pub struct ConflictsEnvelopeSchema {
    #[schema(example = "success")]
    status: String,
    data: ConflictsDataSchema,
}

/// Success envelope returned by login.
#[derive(ToSchema)]
pub struct LoginEnvelopeSchema {
    #[schema(example = "success")]
    status: String,
    data: crate::inbound::http::users::LoginResponse,
}

//! Travel order HTTP handlers.
//!
//! ```text
//! GET    /api/v1/travel-orders?status=approved&destination=york&page=2
//! POST   /api/v1/travel-orders {"destination","departureDate","returnDate"}
//! GET    /api/v1/travel-orders/conflicts?departureDate=..&returnDate=..
//! GET    /api/v1/travel-orders/{id}
//! PATCH  /api/v1/travel-orders/{id} {"status":"approved"}
//! DELETE /api/v1/travel-orders/{id}
//! ```
//!
//! Every route requires a session. Handlers only translate wire shapes; the
//! rules live in [`crate::domain::TravelOrderService`].

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, route, web};
use pagination::{Page, PageLinks};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CreateTravelOrderRequest, DeleteTravelOrderRequest, FindConflictsRequest,
    GetTravelOrderRequest, ListTravelOrdersRequest, TransitionTravelOrderRequest,
    TravelOrderPayload,
};
use crate::domain::{
    Error, FieldErrors, NewTravelOrderInput, TravelOrderFilter, TravelOrderFilterInput,
    TravelOrderId, validation_error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::respond;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::schemas::{
    ConflictsEnvelopeSchema, TravelOrderEnvelopeSchema, TravelOrderListEnvelopeSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListTravelOrdersQuery {
    /// `requested`, `approved` or `cancelled`.
    pub status: Option<String>,
    /// Case-insensitive substring of the destination.
    #[serde(alias = "destinationContains")]
    pub destination: Option<String>,
    /// Window start; applies together with `returnDate`.
    #[param(format = "date")]
    pub departure_date: Option<String>,
    /// Window end; applies together with `departureDate`.
    #[param(format = "date")]
    pub return_date: Option<String>,
    /// One-based page number.
    pub page: Option<String>,
}

/// Body for creating an order.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTravelOrderBody {
    #[schema(example = "Paris")]
    pub destination: Option<String>,
    #[schema(format = "date", example = "2025-06-01")]
    pub departure_date: Option<String>,
    #[schema(format = "date", example = "2025-06-08")]
    pub return_date: Option<String>,
}

impl From<CreateTravelOrderBody> for NewTravelOrderInput {
    fn from(body: CreateTravelOrderBody) -> Self {
        Self {
            destination: body.destination,
            departure_date: body.departure_date,
            return_date: body.return_date,
        }
    }
}

/// Body for approving or cancelling an order.
///
/// `status` is taken as any JSON value so a malformed value is reported
/// after the ownership check rather than as a body parse failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct TransitionTravelOrderBody {
    #[schema(value_type = Option<String>, example = "approved")]
    pub status: Option<Value>,
}

impl TransitionTravelOrderBody {
    fn raw_status(self) -> Option<String> {
        match self.status {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(raw),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// Query parameters of the conflict preview.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ConflictsQuery {
    #[param(format = "date")]
    pub departure_date: Option<String>,
    #[param(format = "date")]
    pub return_date: Option<String>,
    /// Order to leave out, typically the one being edited.
    #[param(format = "uuid")]
    pub exclude: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TravelOrderData {
    travel_order: TravelOrderPayload,
}

#[derive(Debug, Serialize)]
struct PageWithLinks {
    #[serde(flatten)]
    page: Page<TravelOrderPayload>,
    links: PageLinks,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TravelOrderListData {
    travel_orders: PageWithLinks,
}

#[derive(Debug, Serialize)]
struct ConflictsData {
    conflicts: Vec<TravelOrderPayload>,
}

fn order_response(status: StatusCode, order: TravelOrderPayload) -> HttpResponse {
    respond(
        status,
        TravelOrderData {
            travel_order: order,
        },
    )
}

/// Unparseable ids cannot name an order, so they read as "not found".
fn parse_order_id(raw: &str) -> Result<TravelOrderId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found("Travel order not found"))
}

/// List the caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/travel-orders",
    params(ListTravelOrdersQuery),
    responses(
        (status = 200, description = "One page of orders", body = TravelOrderListEnvelopeSchema),
        (status = 401, description = "Unauthenticated", body = ErrorEnvelope),
        (status = 422, description = "Invalid filters", body = ErrorEnvelope),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["travel-orders"],
    operation_id = "listTravelOrders"
)]
#[get("/travel-orders")]
pub async fn list_travel_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    query: web::Query<ListTravelOrdersQuery>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let ListTravelOrdersQuery {
        status,
        destination,
        departure_date,
        return_date,
        page,
    } = query.into_inner();
    let filter = TravelOrderFilter::parse(&TravelOrderFilterInput {
        status,
        destination,
        departure_date,
        return_date,
    })
    .map_err(|errors| validation_error(&errors))?;

    let page = state
        .travel_orders_query
        .list(ListTravelOrdersRequest {
            principal,
            filter,
            page,
        })
        .await?;
    let links = PageLinks::for_page(&req.full_url(), &page);
    Ok(respond(
        StatusCode::OK,
        TravelOrderListData {
            travel_orders: PageWithLinks { page, links },
        },
    ))
}

/// Book a trip in the `requested` status.
#[utoipa::path(
    post,
    path = "/api/v1/travel-orders",
    request_body = CreateTravelOrderBody,
    responses(
        (status = 201, description = "Order created", body = TravelOrderEnvelopeSchema),
        (status = 401, description = "Unauthenticated", body = ErrorEnvelope),
        (status = 409, description = "Dates overlap an active order", body = ErrorEnvelope),
        (status = 422, description = "Invalid input", body = ErrorEnvelope),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["travel-orders"],
    operation_id = "createTravelOrder"
)]
#[post("/travel-orders")]
pub async fn create_travel_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTravelOrderBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let order = state
        .travel_orders
        .create(CreateTravelOrderRequest {
            principal,
            input: payload.into_inner().into(),
        })
        .await?;
    Ok(order_response(StatusCode::CREATED, order))
}

/// Preview the caller's active orders that would block a trip.
#[utoipa::path(
    get,
    path = "/api/v1/travel-orders/conflicts",
    params(ConflictsQuery),
    responses(
        (status = 200, description = "Overlapping active orders", body = ConflictsEnvelopeSchema),
        (status = 401, description = "Unauthenticated", body = ErrorEnvelope),
        (status = 422, description = "Invalid dates", body = ErrorEnvelope)
    ),
    tags = ["travel-orders"],
    operation_id = "findTravelOrderConflicts"
)]
#[get("/travel-orders/conflicts")]
pub async fn find_travel_order_conflicts(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ConflictsQuery>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let ConflictsQuery {
        departure_date,
        return_date,
        exclude,
    } = query.into_inner();
    let exclude = exclude
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            raw.trim().parse::<TravelOrderId>().map_err(|_| {
                validation_error(&FieldErrors::single(
                    "exclude",
                    "The exclude value must be a travel order id.",
                ))
            })
        })
        .transpose()?;
    let conflicts = state
        .travel_orders_query
        .find_conflicts(FindConflictsRequest {
            principal,
            departure_date,
            return_date,
            exclude,
        })
        .await?;
    Ok(respond(StatusCode::OK, ConflictsData { conflicts }))
}

/// Show one of the caller's orders.
#[utoipa::path(
    get,
    path = "/api/v1/travel-orders/{id}",
    params(("id" = String, Path, description = "Travel order id", format = "uuid")),
    responses(
        (status = 200, description = "The order", body = TravelOrderEnvelopeSchema),
        (status = 401, description = "Unauthenticated", body = ErrorEnvelope),
        (status = 404, description = "No such order for the caller", body = ErrorEnvelope)
    ),
    tags = ["travel-orders"],
    operation_id = "showTravelOrder"
)]
#[get("/travel-orders/{id}")]
pub async fn show_travel_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let order_id = parse_order_id(&path)?;
    let order = state
        .travel_orders_query
        .get(GetTravelOrderRequest {
            principal,
            order_id,
        })
        .await?;
    Ok(order_response(StatusCode::OK, order))
}

/// Approve or cancel an order.
#[utoipa::path(
    patch,
    path = "/api/v1/travel-orders/{id}",
    params(("id" = String, Path, description = "Travel order id", format = "uuid")),
    request_body = TransitionTravelOrderBody,
    responses(
        (status = 200, description = "Updated order", body = TravelOrderEnvelopeSchema),
        (status = 401, description = "Unauthenticated", body = ErrorEnvelope),
        (status = 403, description = "Order belongs to someone else", body = ErrorEnvelope),
        (status = 404, description = "No such order", body = ErrorEnvelope),
        (status = 409, description = "Order changed concurrently", body = ErrorEnvelope),
        (status = 422, description = "Invalid status or transition", body = ErrorEnvelope)
    ),
    tags = ["travel-orders"],
    operation_id = "transitionTravelOrder"
)]
#[route("/travel-orders/{id}", method = "PATCH", method = "PUT")]
pub async fn transition_travel_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TransitionTravelOrderBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let order_id = parse_order_id(&path)?;
    let order = state
        .travel_orders
        .transition(TransitionTravelOrderRequest {
            principal,
            order_id,
            status: payload.into_inner().raw_status(),
        })
        .await?;
    Ok(order_response(StatusCode::OK, order))
}

/// Delete one of the caller's orders.
#[utoipa::path(
    delete,
    path = "/api/v1/travel-orders/{id}",
    params(("id" = String, Path, description = "Travel order id", format = "uuid")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorEnvelope),
        (status = 404, description = "No such order for the caller", body = ErrorEnvelope)
    ),
    tags = ["travel-orders"],
    operation_id = "deleteTravelOrder"
)]
#[delete("/travel-orders/{id}")]
pub async fn delete_travel_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let order_id = parse_order_id(&path)?;
    state
        .travel_orders
        .delete(DeleteTravelOrderRequest {
            principal,
            order_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the travel order routes. The conflicts preview precedes
/// `/{id}` so it is not captured as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_travel_orders)
        .service(create_travel_order)
        .service(find_travel_order_conflicts)
        .service(show_travel_order)
        .service(transition_travel_order)
        .service(delete_travel_order);
}

#[cfg(test)]
#[path = "travel_orders_tests.rs"]
mod tests;

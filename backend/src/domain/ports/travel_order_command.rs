//! Driving port for travel order mutations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Error, NewTravelOrderInput, Principal, TravelOrder, TravelOrderId, TravelOrderStatus, UserId,
};

/// Serializable travel order payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelOrderPayload {
    pub id: Uuid,
    pub owner_id: UserId,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: TravelOrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TravelOrder> for TravelOrderPayload {
    fn from(value: TravelOrder) -> Self {
        let dates = value.dates();
        Self {
            id: *value.id().as_uuid(),
            owner_id: value.owner_id().clone(),
            destination: value.destination().to_string(),
            departure_date: dates.start(),
            return_date: dates.end(),
            status: value.status(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Request to book a new trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTravelOrderRequest {
    pub principal: Principal,
    pub input: NewTravelOrderInput,
}

/// Request to approve or cancel an order.
///
/// `status` stays raw so ownership is checked before the value is judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTravelOrderRequest {
    pub principal: Principal,
    pub order_id: TravelOrderId,
    pub status: Option<String>,
}

/// Request to delete an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTravelOrderRequest {
    pub principal: Principal,
    pub order_id: TravelOrderId,
}

/// Domain use-case port for changing travel orders.
#[async_trait]
pub trait TravelOrderCommand: Send + Sync {
    /// Validate and store a new order in the `requested` status.
    async fn create(&self, request: CreateTravelOrderRequest) -> Result<TravelOrderPayload, Error>;

    /// Move an order to `approved` or `cancelled`.
    async fn transition(
        &self,
        request: TransitionTravelOrderRequest,
    ) -> Result<TravelOrderPayload, Error>;

    /// Permanently remove an order owned by the caller.
    async fn delete(&self, request: DeleteTravelOrderRequest) -> Result<(), Error>;
}

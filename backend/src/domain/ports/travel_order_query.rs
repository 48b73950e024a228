//! Driving port for travel order reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, Principal, TravelOrderFilter, TravelOrderId};

use super::TravelOrderPayload;

/// Request for one page of the caller's orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTravelOrdersRequest {
    pub principal: Principal,
    pub filter: TravelOrderFilter,
    /// Raw `page` parameter; absent selects the first page.
    pub page: Option<String>,
}

/// Request for a single order of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTravelOrderRequest {
    pub principal: Principal,
    pub order_id: TravelOrderId,
}

/// Request to preview which orders would block a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindConflictsRequest {
    pub principal: Principal,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub exclude: Option<TravelOrderId>,
}

/// Domain use-case port for reading travel orders.
#[async_trait]
pub trait TravelOrderQuery: Send + Sync {
    /// Filtered page of the caller's orders, newest first.
    async fn list(
        &self,
        request: ListTravelOrdersRequest,
    ) -> Result<Page<TravelOrderPayload>, Error>;

    /// One order of the caller.
    async fn get(&self, request: GetTravelOrderRequest) -> Result<TravelOrderPayload, Error>;

    /// Active orders of the caller overlapping the requested dates.
    async fn find_conflicts(
        &self,
        request: FindConflictsRequest,
    ) -> Result<Vec<TravelOrderPayload>, Error>;
}

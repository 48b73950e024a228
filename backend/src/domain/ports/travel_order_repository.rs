//! Port for travel order persistence.
//!
//! Every owner-scoped call takes the owner explicitly; adapters never infer
//! it from ambient state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::{
    DateRange, TravelOrder, TravelOrderFilter, TravelOrderId, TravelOrderStatus, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by travel order repository adapters.
    pub enum TravelOrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "travel order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "travel order repository query failed: {message}",
    }
}

/// Result of an atomic conflict-checked insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The order was stored.
    Inserted(TravelOrder),
    /// Nothing was stored because these orders overlap the new one.
    Conflicts(Vec<TravelOrder>),
}

/// Conditional status update.
///
/// Applies only while the stored status still equals `expected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub owner_id: UserId,
    pub order_id: TravelOrderId,
    pub expected: TravelOrderStatus,
    pub next: TravelOrderStatus,
    pub updated_at: DateTime<Utc>,
}

/// Port for storing and querying travel orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelOrderRepository: Send + Sync {
    /// Store `order` unless an active order of the same owner overlaps it.
    ///
    /// The check and the insert are atomic with respect to other inserts for
    /// the same owner.
    async fn insert_unless_conflicting(
        &self,
        order: &TravelOrder,
    ) -> Result<InsertOutcome, TravelOrderRepositoryError>;

    /// Active orders of `owner` overlapping `range`, minus `exclude`.
    async fn find_conflicts(
        &self,
        owner: &UserId,
        range: &DateRange,
        exclude: Option<TravelOrderId>,
    ) -> Result<Vec<TravelOrder>, TravelOrderRepositoryError>;

    /// Unscoped lookup, used only to tell "forbidden" from "not found".
    async fn find_by_id(
        &self,
        id: TravelOrderId,
    ) -> Result<Option<TravelOrder>, TravelOrderRepositoryError>;

    /// Lookup restricted to orders of `owner`.
    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: TravelOrderId,
    ) -> Result<Option<TravelOrder>, TravelOrderRepositoryError>;

    /// Apply `update`; `None` when the order is missing or its status moved on.
    async fn update_status(
        &self,
        update: &StatusUpdate,
    ) -> Result<Option<TravelOrder>, TravelOrderRepositoryError>;

    /// Remove an order of `owner`; `false` when nothing matched.
    async fn delete_for_owner(
        &self,
        owner: &UserId,
        id: TravelOrderId,
    ) -> Result<bool, TravelOrderRepositoryError>;

    /// Orders of `owner` matching `filter`, newest first.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &TravelOrderFilter,
        page: PageRequest,
    ) -> Result<Page<TravelOrder>, TravelOrderRepositoryError>;
}

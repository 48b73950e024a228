//! Travel order lifecycle service.
//!
//! Implements the [`TravelOrderCommand`] and [`TravelOrderQuery`] driving
//! ports on top of a [`TravelOrderRepository`]. Creation validates input and
//! relies on the repository's atomic conflict-checked insert; transitions
//! guard ownership, the requested target and the state machine before a
//! conditional update, then announce the change through the
//! [`TravelOrderNotifier`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest, PaginationError};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateTravelOrderRequest, DeleteTravelOrderRequest, FindConflictsRequest,
    GetTravelOrderRequest, InsertOutcome, ListTravelOrdersRequest, StatusUpdate,
    TransitionTravelOrderRequest, TravelOrderCommand, TravelOrderNotifier, TravelOrderPayload,
    TravelOrderQuery, TravelOrderRepository, TravelOrderRepositoryError,
};
use crate::domain::{
    CreationPolicy, Error, FieldErrors, StatusTransitionError, TravelOrder, TravelOrderDraft,
    TravelOrderId, TravelOrderStatus, TravelOrderStatusEvent, parse_requested_status,
    validate_new_order, validate_trip_dates,
};

/// Conditional updates attempted before a transition gives up.
pub const MAX_TRANSITION_ATTEMPTS: u32 = 3;

const NOT_FOUND_MESSAGE: &str = "Travel order not found";

fn map_repository_error(error: TravelOrderRepositoryError) -> Error {
    match error {
        TravelOrderRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("travel order repository unavailable: {message}"))
        }
        TravelOrderRepositoryError::Query { message } => {
            Error::internal(format!("travel order repository error: {message}"))
        }
    }
}

/// `invalid_request` error carrying `errors` under the `errors` detail key.
pub fn validation_error(errors: &FieldErrors) -> Error {
    Error::invalid_request("The given data was invalid.").with_details(json!({ "errors": errors }))
}

fn pagination_error(error: &PaginationError) -> Error {
    validation_error(&FieldErrors::single("page", error.to_string()))
}

fn conflict_error(conflicts: Vec<TravelOrder>) -> Error {
    let payloads: Vec<TravelOrderPayload> = conflicts.into_iter().map(Into::into).collect();
    Error::conflict("Date conflict with existing orders.")
        .with_details(json!({ "conflicts": payloads }))
}

fn transition_error(error: StatusTransitionError) -> Error {
    match error {
        StatusTransitionError::NotATarget => {
            validation_error(&FieldErrors::single("status", error.to_string()))
        }
        StatusTransitionError::CancelRequiresApproval
        | StatusTransitionError::AlreadyApproved
        | StatusTransitionError::CancelledIsFinal => Error::invalid_transition(error.to_string()),
    }
}

/// Tunables for [`TravelOrderService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelOrderSettings {
    /// Orders per list page.
    pub page_size: u32,
    /// Rules applied on creation.
    pub creation: CreationPolicy,
}

impl Default for TravelOrderSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            creation: CreationPolicy::default(),
        }
    }
}

/// Travel order service implementing the command and query driving ports.
#[derive(Clone)]
pub struct TravelOrderService<R> {
    repo: Arc<R>,
    notifier: Arc<dyn TravelOrderNotifier>,
    clock: Arc<dyn Clock + Send + Sync>,
    settings: TravelOrderSettings,
}

impl<R> TravelOrderService<R> {
    /// Create a service with default settings.
    pub fn new(
        repo: Arc<R>,
        notifier: Arc<dyn TravelOrderNotifier>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            repo,
            notifier,
            clock,
            settings: TravelOrderSettings::default(),
        }
    }

    /// Replace the service settings.
    pub fn with_settings(mut self, settings: TravelOrderSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl<R> TravelOrderService<R>
where
    R: TravelOrderRepository,
{
    async fn transition_once(
        &self,
        request: &TransitionTravelOrderRequest,
    ) -> Result<Option<TravelOrder>, Error> {
        let order = self
            .repo
            .find_by_id(request.order_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;

        if !request.principal.is(order.owner_id()) {
            return Err(Error::forbidden(
                "You do not have permission to change this travel order.",
            ));
        }

        let target = parse_requested_status(request.status.as_deref())
            .map_err(|errors| validation_error(&errors))?;
        let next = order
            .status()
            .transition_to(target)
            .map_err(transition_error)?;

        let update = StatusUpdate {
            owner_id: order.owner_id().clone(),
            order_id: order.id(),
            expected: order.status(),
            next,
            updated_at: self.clock.utc(),
        };
        self.repo
            .update_status(&update)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> TravelOrderCommand for TravelOrderService<R>
where
    R: TravelOrderRepository,
{
    async fn create(&self, request: CreateTravelOrderRequest) -> Result<TravelOrderPayload, Error> {
        let now = self.clock.utc();
        let validated = validate_new_order(
            &request.input,
            now.date_naive(),
            self.settings.creation,
        )
        .map_err(|errors| validation_error(&errors))?;

        let order = TravelOrder::new(TravelOrderDraft {
            id: TravelOrderId::random(),
            owner_id: request.principal.user_id().clone(),
            destination: validated.destination,
            dates: validated.dates,
            status: TravelOrderStatus::Requested,
            created_at: now,
            updated_at: now,
        })
        .map_err(|err| Error::internal(format!("invalid travel order: {err}")))?;

        match self
            .repo
            .insert_unless_conflicting(&order)
            .await
            .map_err(map_repository_error)?
        {
            InsertOutcome::Inserted(stored) => {
                info!(
                    order_id = %stored.id(),
                    owner_id = %stored.owner_id(),
                    "travel order created"
                );
                Ok(stored.into())
            }
            InsertOutcome::Conflicts(conflicts) => {
                debug!(
                    owner_id = %order.owner_id(),
                    conflicts = conflicts.len(),
                    "travel order rejected for overlapping dates"
                );
                Err(conflict_error(conflicts))
            }
        }
    }

    async fn transition(
        &self,
        request: TransitionTravelOrderRequest,
    ) -> Result<TravelOrderPayload, Error> {
        for attempt in 1..=MAX_TRANSITION_ATTEMPTS {
            if let Some(updated) = self.transition_once(&request).await? {
                info!(
                    order_id = %updated.id(),
                    owner_id = %updated.owner_id(),
                    status = %updated.status(),
                    "travel order status changed"
                );
                if updated.status().is_notifiable() {
                    self.notifier
                        .notify(TravelOrderStatusEvent::for_order(updated.clone()));
                }
                return Ok(updated.into());
            }
            debug!(
                order_id = %request.order_id,
                attempt,
                "travel order changed concurrently; re-reading"
            );
        }
        Err(Error::conflict(
            "The travel order changed concurrently; please retry.",
        ))
    }

    async fn delete(&self, request: DeleteTravelOrderRequest) -> Result<(), Error> {
        let removed = self
            .repo
            .delete_for_owner(request.principal.user_id(), request.order_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(NOT_FOUND_MESSAGE));
        }
        info!(
            order_id = %request.order_id,
            owner_id = %request.principal.user_id(),
            "travel order deleted"
        );
        Ok(())
    }
}

#[async_trait]
impl<R> TravelOrderQuery for TravelOrderService<R>
where
    R: TravelOrderRepository,
{
    async fn list(
        &self,
        request: ListTravelOrdersRequest,
    ) -> Result<Page<TravelOrderPayload>, Error> {
        let page = PageRequest::parse(request.page.as_deref(), self.settings.page_size)
            .map_err(|err| pagination_error(&err))?;
        let orders = self
            .repo
            .list_for_owner(request.principal.user_id(), &request.filter, page)
            .await
            .map_err(map_repository_error)?;
        Ok(orders.map(Into::into))
    }

    async fn get(&self, request: GetTravelOrderRequest) -> Result<TravelOrderPayload, Error> {
        self.repo
            .find_for_owner(request.principal.user_id(), request.order_id)
            .await
            .map_err(map_repository_error)?
            .map(Into::into)
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    async fn find_conflicts(
        &self,
        request: FindConflictsRequest,
    ) -> Result<Vec<TravelOrderPayload>, Error> {
        let range = validate_trip_dates(
            request.departure_date.as_ref(),
            request.return_date.as_ref(),
        )
        .map_err(|errors| validation_error(&errors))?;
        let conflicts = self
            .repo
            .find_conflicts(request.principal.user_id(), &range, request.exclude)
            .await
            .map_err(map_repository_error)?;
        Ok(conflicts.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[path = "travel_order_service_tests.rs"]
mod tests;

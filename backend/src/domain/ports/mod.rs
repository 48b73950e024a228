//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod notification_delivery;
mod travel_order_command;
mod travel_order_notifier;
mod travel_order_query;
mod travel_order_repository;

pub use login_service::{FIXTURE_ACCOUNTS, FIXTURE_PASSWORD, FixtureLoginService, LoginService};
#[cfg(test)]
pub use notification_delivery::MockNotificationDelivery;
pub use notification_delivery::{NotificationDelivery, NotificationDeliveryError};
pub use travel_order_command::{
    CreateTravelOrderRequest, DeleteTravelOrderRequest, TransitionTravelOrderRequest,
    TravelOrderCommand, TravelOrderPayload,
};
#[cfg(test)]
pub use travel_order_notifier::MockTravelOrderNotifier;
pub use travel_order_notifier::{NoOpTravelOrderNotifier, TravelOrderNotifier};
pub use travel_order_query::{
    FindConflictsRequest, GetTravelOrderRequest, ListTravelOrdersRequest, TravelOrderQuery,
};
#[cfg(test)]
pub use travel_order_repository::MockTravelOrderRepository;
pub use travel_order_repository::{
    InsertOutcome, StatusUpdate, TravelOrderRepository, TravelOrderRepositoryError,
};

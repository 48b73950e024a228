//! Port for announcing committed status changes.

use crate::domain::TravelOrderStatusEvent;

/// Sink for status change events.
///
/// Emission is fire-and-forget: implementations must not block the caller
/// and swallow (logging) their own failures.
#[cfg_attr(test, mockall::automock)]
pub trait TravelOrderNotifier: Send + Sync {
    /// Hand `event` over for delivery.
    fn notify(&self, event: TravelOrderStatusEvent);
}

/// Notifier that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpTravelOrderNotifier;

impl TravelOrderNotifier for NoOpTravelOrderNotifier {
    fn notify(&self, _event: TravelOrderStatusEvent) {}
}

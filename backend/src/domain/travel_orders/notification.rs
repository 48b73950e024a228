//! Owner notifications emitted when an order is approved or cancelled.

use crate::domain::{TraceId, UserId};

use super::{TravelOrder, TravelOrderStatus};

/// A committed status change, queued for delivery to the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelOrderStatusEvent {
    pub order: TravelOrder,
    pub status: TravelOrderStatus,
    /// Request that caused the change, for log correlation.
    pub trace_id: Option<TraceId>,
}

impl TravelOrderStatusEvent {
    /// Event for `order` after it reached its current status.
    pub fn for_order(order: TravelOrder) -> Self {
        Self {
            status: order.status(),
            order,
            trace_id: TraceId::current(),
        }
    }

    pub fn recipient(&self) -> &UserId {
        self.order.owner_id()
    }
}

const CLOSING_LINE: &str = "Thank you for using our application!";

/// Rendered message handed to a delivery channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub recipient: UserId,
    pub subject: String,
    pub body: String,
    /// Relative link to the order.
    pub action_url: String,
}

impl From<&TravelOrderStatusEvent> for NotificationMessage {
    fn from(event: &TravelOrderStatusEvent) -> Self {
        let (subject, verb) = match event.status {
            TravelOrderStatus::Approved => ("Your travel order has been approved!", "approved"),
            TravelOrderStatus::Cancelled => ("Your travel order has been cancelled.", "cancelled"),
            TravelOrderStatus::Requested => ("Your travel order has been received.", "received"),
        };
        Self {
            recipient: event.recipient().clone(),
            subject: subject.to_owned(),
            body: format!(
                "Your travel order to {} has been {verb}.\n\n{CLOSING_LINE}",
                event.order.destination()
            ),
            action_url: format!("/travel-orders/{}", event.order.id()),
        }
    }
}

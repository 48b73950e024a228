//! Queue-backed notifier.

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::TravelOrderStatusEvent;
use crate::domain::ports::TravelOrderNotifier;

/// Sending half handed to the service.
#[derive(Debug, Clone)]
pub struct ChannelTravelOrderNotifier {
    sender: mpsc::UnboundedSender<TravelOrderStatusEvent>,
}

/// Receiving half drained by the worker.
#[derive(Debug)]
pub struct NotificationReceiver {
    receiver: mpsc::UnboundedReceiver<TravelOrderStatusEvent>,
}

impl NotificationReceiver {
    /// Next queued event; `None` once every notifier has been dropped.
    pub async fn recv(&mut self) -> Option<TravelOrderStatusEvent> {
        self.receiver.recv().await
    }
}

/// Create a connected notifier and receiver.
pub fn notification_channel() -> (ChannelTravelOrderNotifier, NotificationReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        ChannelTravelOrderNotifier { sender },
        NotificationReceiver { receiver },
    )
}

impl TravelOrderNotifier for ChannelTravelOrderNotifier {
    fn notify(&self, event: TravelOrderStatusEvent) {
        let order_id = event.order.id();
        if self.sender.send(event).is_err() {
            warn!(%order_id, "notification queue closed; dropping event");
        }
    }
}

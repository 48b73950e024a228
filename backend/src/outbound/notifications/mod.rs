//! Owner notifications for approved and cancelled travel orders.
//!
//! The service hands events to a [`ChannelTravelOrderNotifier`], which never
//! blocks. A [`NotificationWorker`] drains the queue on its own task and
//! delivers each rendered message with bounded retries, so delivery failures
//! never affect the committed status change.

mod channel_notifier;
mod logging_delivery;
mod worker;

pub use channel_notifier::{ChannelTravelOrderNotifier, NotificationReceiver, notification_channel};
pub use logging_delivery::LoggingNotificationDelivery;
pub use worker::{DeliveryOutcome, NotificationWorker, RetryPolicy, RetrySleeper, TokioSleeper};

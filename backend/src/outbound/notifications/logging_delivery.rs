//! Delivery adapter that writes notifications to the structured log.
//!
//! Stands in for a mail transport in development and in deployments without
//! one configured.

use async_trait::async_trait;
use tracing::info;

use crate::domain::NotificationMessage;
use crate::domain::ports::{NotificationDelivery, NotificationDeliveryError};

/// Logs each message at `info` level and always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotificationDelivery;

#[async_trait]
impl NotificationDelivery for LoggingNotificationDelivery {
    async fn deliver(
        &self,
        message: &NotificationMessage,
    ) -> Result<(), NotificationDeliveryError> {
        info!(
            recipient = %message.recipient,
            subject = %message.subject,
            body = %message.body,
            action_url = %message.action_url,
            "travel order notification"
        );
        Ok(())
    }
}

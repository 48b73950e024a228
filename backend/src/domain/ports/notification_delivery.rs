//! Port for delivering rendered notifications to their recipients.

use async_trait::async_trait;

use crate::domain::NotificationMessage;

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification delivery adapters.
    pub enum NotificationDeliveryError {
        /// The transport could not be reached; retrying may help.
        Transport { message: String } =>
            "notification transport failed: {message}",
        /// The message was refused and will not succeed on retry.
        Rejected { message: String } =>
            "notification rejected: {message}",
    }
}

impl NotificationDeliveryError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Delivery channel such as mail or a log sink.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDelivery: Send + Sync {
    /// Send `message` once.
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationDeliveryError>;
}

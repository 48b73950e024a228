//! Background delivery of queued notifications with bounded retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{NotificationDelivery, NotificationDeliveryError};
use crate::domain::{NotificationMessage, TraceId, TravelOrderStatusEvent};

use super::NotificationReceiver;

/// Async sleep used between delivery attempts.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Retry budget for one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never below one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1_u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Result of delivering one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Delivered after this many attempts.
    Delivered { attempts: u32 },
    /// Abandoned after this many attempts.
    Abandoned {
        attempts: u32,
        error: NotificationDeliveryError,
    },
}

/// Drains the notification queue.
pub struct NotificationWorker {
    receiver: NotificationReceiver,
    delivery: Arc<dyn NotificationDelivery>,
    policy: RetryPolicy,
    sleeper: Arc<dyn RetrySleeper>,
}

impl NotificationWorker {
    /// Worker sleeping on the Tokio timer between attempts.
    pub fn new(
        receiver: NotificationReceiver,
        delivery: Arc<dyn NotificationDelivery>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            receiver,
            delivery,
            policy,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the sleeper, typically with an instant one in tests.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn RetrySleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Deliver events until every notifier has been dropped.
    pub async fn run(mut self) {
        info!("notification worker started");
        while self.deliver_next().await.is_some() {}
        info!("notification worker stopped");
    }

    /// Wait for the next event and deliver it under its request's trace id.
    ///
    /// Returns `None` once every notifier has been dropped.
    pub async fn deliver_next(&mut self) -> Option<DeliveryOutcome> {
        let event = self.receiver.recv().await?;
        let outcome = match event.trace_id {
            Some(trace_id) => TraceId::scope(trace_id, self.process(&event)).await,
            None => self.process(&event).await,
        };
        Some(outcome)
    }

    async fn process(&self, event: &TravelOrderStatusEvent) -> DeliveryOutcome {
        let outcome = self.deliver(event).await;
        if let DeliveryOutcome::Abandoned { attempts, error } = &outcome {
            warn!(
                order_id = %event.order.id(),
                recipient = %event.recipient(),
                trace_id = ?event.trace_id.map(|id| id.to_string()),
                attempts,
                %error,
                "notification delivery abandoned"
            );
        }
        outcome
    }

    /// Render `event` and deliver it, retrying transport failures.
    pub async fn deliver(&self, event: &TravelOrderStatusEvent) -> DeliveryOutcome {
        let message = NotificationMessage::from(event);
        let max_attempts = self.policy.attempts();
        let mut attempt = 1;
        loop {
            match self.delivery.deliver(&message).await {
                Ok(()) => {
                    debug!(order_id = %event.order.id(), attempt, "notification delivered");
                    return DeliveryOutcome::Delivered { attempts: attempt };
                }
                Err(error) if error.is_retryable() && attempt < max_attempts => {
                    let delay = self.policy.delay_after(attempt);
                    debug!(
                        order_id = %event.order.id(),
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "notification delivery failed; retrying"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    return DeliveryOutcome::Abandoned {
                        attempts: attempt,
                        error,
                    };
                }
            }
        }
    }
}

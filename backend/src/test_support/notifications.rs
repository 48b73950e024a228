//! Notification doubles.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{NotificationDelivery, NotificationDeliveryError, TravelOrderNotifier};
use crate::domain::{NotificationMessage, TravelOrderStatusEvent};
use crate::outbound::notifications::RetrySleeper;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Notifier that keeps every event for later inspection.
#[derive(Default)]
pub struct RecordingNotifier(Mutex<Vec<TravelOrderStatusEvent>>);

impl RecordingNotifier {
    pub fn events(&self) -> Vec<TravelOrderStatusEvent> {
        lock(&self.0).clone()
    }
}

impl TravelOrderNotifier for RecordingNotifier {
    fn notify(&self, event: TravelOrderStatusEvent) {
        lock(&self.0).push(event);
    }
}

/// Sleeper that returns at once and records the requested delays.
#[derive(Default)]
pub struct ImmediateSleeper(Mutex<Vec<Duration>>);

impl ImmediateSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        lock(&self.0).clone()
    }
}

#[async_trait]
impl RetrySleeper for ImmediateSleeper {
    async fn sleep(&self, duration: Duration) {
        lock(&self.0).push(duration);
    }
}

/// Delivery that accepts every message.
#[derive(Default)]
pub struct RecordingDelivery(Mutex<Vec<NotificationMessage>>);

impl RecordingDelivery {
    pub fn delivered(&self) -> Vec<NotificationMessage> {
        lock(&self.0).clone()
    }
}

#[async_trait]
impl NotificationDelivery for RecordingDelivery {
    async fn deliver(
        &self,
        message: &NotificationMessage,
    ) -> Result<(), NotificationDeliveryError> {
        lock(&self.0).push(message.clone());
        Ok(())
    }
}

/// Delivery that fails a fixed number of times before succeeding.
pub struct FailingDelivery {
    remaining_failures: Mutex<u32>,
    error: NotificationDeliveryError,
    inner: RecordingDelivery,
}

impl FailingDelivery {
    /// Fail `failures` times with `error`, then deliver.
    pub fn new(failures: u32, error: NotificationDeliveryError) -> Self {
        Self {
            remaining_failures: Mutex::new(failures),
            error,
            inner: RecordingDelivery::default(),
        }
    }

    pub fn delivered(&self) -> Vec<NotificationMessage> {
        self.inner.delivered()
    }
}

#[async_trait]
impl NotificationDelivery for FailingDelivery {
    async fn deliver(
        &self,
        message: &NotificationMessage,
    ) -> Result<(), NotificationDeliveryError> {
        {
            let mut remaining = lock(&self.remaining_failures);
            if *remaining > 0 {
                *remaining -= 1;
                return Err(self.error.clone());
            }
        }
        self.inner.deliver(message).await
    }
}

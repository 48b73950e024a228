//! Builders for the handler state and the notification worker.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{FixtureLoginService, TravelOrderNotifier, TravelOrderRepository};
use crate::domain::{TravelOrderService, TravelOrderSettings};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryTravelOrderRepository;
use crate::outbound::notifications::{
    LoggingNotificationDelivery, NotificationWorker, RetryPolicy, notification_channel,
};
use crate::outbound::persistence::{
    DbPool, DieselTravelOrderRepository, MigrationError, PoolConfig, PoolError,
    run_pending_migrations,
};

/// Failures while preparing the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Handler state plus the worker draining its notifications.
pub struct AppComponents {
    pub http_state: HttpState,
    pub worker: NotificationWorker,
}

/// Where orders are kept.
pub enum TravelOrderStore {
    Postgres(DbPool),
    Memory,
}

impl TravelOrderStore {
    /// Migrate and connect to PostgreSQL when configured, else fall back to
    /// the in-memory store.
    pub async fn connect(pool_config: Option<PoolConfig>) -> Result<Self, StoreError> {
        let Some(config) = pool_config else {
            warn!("no database configured; travel orders are kept in memory and lost on restart");
            return Ok(Self::Memory);
        };
        let applied = run_pending_migrations(config.database_url()).await?;
        info!(count = applied.len(), migrations = ?applied, "database migrations applied");
        let pool = DbPool::new(config).await?;
        Ok(Self::Postgres(pool))
    }
}

fn service_state<R>(
    repo: Arc<R>,
    notifier: Arc<dyn TravelOrderNotifier>,
    clock: Arc<dyn Clock + Send + Sync>,
    settings: TravelOrderSettings,
) -> HttpState
where
    R: TravelOrderRepository + 'static,
{
    let service = Arc::new(TravelOrderService::new(repo, notifier, clock).with_settings(settings));
    HttpState::new(Arc::new(FixtureLoginService), service.clone(), service)
}

/// Wire the service over `store` with a queue-backed notifier.
pub fn build_components(
    store: TravelOrderStore,
    clock: Arc<dyn Clock + Send + Sync>,
    settings: TravelOrderSettings,
    retry: RetryPolicy,
) -> AppComponents {
    let (notifier, receiver) = notification_channel();
    let notifier: Arc<dyn TravelOrderNotifier> = Arc::new(notifier);
    let http_state = match store {
        TravelOrderStore::Postgres(pool) => service_state(
            Arc::new(DieselTravelOrderRepository::new(pool)),
            notifier,
            clock,
            settings,
        ),
        TravelOrderStore::Memory => service_state(
            Arc::new(InMemoryTravelOrderRepository::new()),
            notifier,
            clock,
            settings,
        ),
    };
    let worker = NotificationWorker::new(receiver, Arc::new(LoggingNotificationDelivery), retry);
    AppComponents { http_state, worker }
}

//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! they can be exercised without a database.

use std::sync::Arc;

use crate::domain::ports::{LoginService, TravelOrderCommand, TravelOrderQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub travel_orders: Arc<dyn TravelOrderCommand>,
    pub travel_orders_query: Arc<dyn TravelOrderQuery>,
}

impl HttpState {
    /// Bundle the ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use travel_orders::domain::TravelOrderService;
    /// use travel_orders::domain::ports::{FixtureLoginService, NoOpTravelOrderNotifier};
    /// use travel_orders::inbound::http::state::HttpState;
    /// use travel_orders::outbound::memory::InMemoryTravelOrderRepository;
    ///
    /// let service = Arc::new(TravelOrderService::new(
    ///     Arc::new(InMemoryTravelOrderRepository::new()),
    ///     Arc::new(NoOpTravelOrderNotifier),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(Arc::new(FixtureLoginService), service.clone(), service);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        travel_orders: Arc<dyn TravelOrderCommand>,
        travel_orders_query: Arc<dyn TravelOrderQuery>,
    ) -> Self {
        Self {
            login,
            travel_orders,
            travel_orders_query,
        }
    }
}

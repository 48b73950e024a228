//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and contain
//! no business rules. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a `bb8`
//! pool driven by `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use travel_orders::outbound::persistence::{DbPool, DieselTravelOrderRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/travel")).await?;
//! let repo = DieselTravelOrderRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_travel_order_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_travel_order_repository::DieselTravelOrderRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};

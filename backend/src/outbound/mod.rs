//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repository using Diesel
//! - **memory**: process-local repository used when no database is configured
//! - **notifications**: queued owner notifications with retrying delivery
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod notifications;
pub mod persistence;

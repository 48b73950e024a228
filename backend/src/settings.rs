//! Application settings loaded via OrthoConfig.
//!
//! Values layer command-line flags over `TRAVEL_ORDERS_*` environment
//! variables over a configuration file. Unset values fall back to the
//! defaults below.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

use crate::domain::{CreationPolicy, TravelOrderSettings};
use crate::outbound::notifications::RetryPolicy;
use crate::outbound::persistence::{DEFAULT_MAX_CONNECTIONS, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_NOTIFICATION_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_NOTIFICATION_BASE_DELAY_MS: u64 = 200;

/// Reasons loaded settings cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("bind address {value:?} is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRAVEL_ORDERS")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it orders are kept in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Orders per list page.
    pub page_size: Option<u32>,
    /// Accept departure dates earlier than today.
    #[ortho_config(default = false)]
    pub allow_past_departures: bool,
    /// Delivery attempts per notification, including the first.
    pub notification_max_attempts: Option<u32>,
    /// Delay before the first notification retry, in milliseconds.
    pub notification_base_delay_ms: Option<u64>,
}

fn positive(value: Option<u32>, default: u32, name: &'static str) -> Result<u32, SettingsError> {
    match value {
        Some(0) => Err(SettingsError::Zero { name }),
        Some(value) => Ok(value),
        None => Ok(default),
    }
}

impl AppSettings {
    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Pool settings, when a database is configured.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        let max_size = positive(
            self.db_max_connections,
            DEFAULT_MAX_CONNECTIONS,
            "db_max_connections",
        )?;
        Ok(self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| PoolConfig::new(url).with_max_size(max_size)))
    }

    pub fn travel_order_settings(&self) -> Result<TravelOrderSettings, SettingsError> {
        Ok(TravelOrderSettings {
            page_size: positive(self.page_size, DEFAULT_PAGE_SIZE, "page_size")?,
            creation: CreationPolicy {
                allow_past_departures: self.allow_past_departures,
            },
        })
    }

    pub fn retry_policy(&self) -> Result<RetryPolicy, SettingsError> {
        Ok(RetryPolicy {
            max_attempts: positive(
                self.notification_max_attempts,
                DEFAULT_NOTIFICATION_MAX_ATTEMPTS,
                "notification_max_attempts",
            )?,
            base_delay: Duration::from_millis(
                self.notification_base_delay_ms
                    .unwrap_or(DEFAULT_NOTIFICATION_BASE_DELAY_MS),
            ),
        })
    }
}

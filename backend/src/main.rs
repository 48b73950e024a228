//! Travel orders entry-point: loads settings, wires storage and the
//! notification worker, then serves the REST API.

use std::io;
use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use travel_orders::inbound::http::health::HealthState;
use travel_orders::inbound::http::session_config::{BuildMode, session_settings_from_env};
use travel_orders::server::{
    AppComponents, ServerConfig, TravelOrderStore, build_components, create_server,
};
use travel_orders::settings::AppSettings;

fn startup_error(context: &str, error: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{context}: {error}"))
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<actix_web_prom::PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("travel_orders")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "Prometheus metrics disabled");
            None
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| startup_error("loading settings", e))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| startup_error("invalid settings", e))?;
    let pool_config = settings
        .pool_config()
        .map_err(|e| startup_error("invalid settings", e))?;
    let order_settings = settings
        .travel_order_settings()
        .map_err(|e| startup_error("invalid settings", e))?;
    let retry = settings
        .retry_policy()
        .map_err(|e| startup_error("invalid settings", e))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| startup_error("session configuration", e))?;

    let store = TravelOrderStore::connect(pool_config)
        .await
        .map_err(|e| startup_error("preparing storage", e))?;
    let AppComponents { http_state, worker } =
        build_components(store, Arc::new(DefaultClock), order_settings, retry);
    actix_web::rt::spawn(worker.run());

    let config = ServerConfig::new(session, bind_addr);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics());

    let listen_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, config)?;
    info!(%listen_addr, "travel orders API listening");
    server.await
}

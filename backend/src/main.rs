//! User service entry-point: loads settings, wires adapters, and serves HTTP.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_service::inbound::http::health::HealthState;
use user_service::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("user_service")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}

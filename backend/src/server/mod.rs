//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
use metrics::{MetricsLayer, delegation_metrics};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_service::Trace;
#[cfg(debug_assertions)]
use user_service::doc::ApiDoc;
use user_service::domain::{DelegationClient, UserDirectoryService};
use user_service::inbound::http::{self, health::HealthState, state::HttpState};
use user_service::outbound::memory::InMemoryUserStore;
use user_service::outbound::processing::HttpProcessingService;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Wire the user directory over the in-memory store and the HTTP processing
/// client.
fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let processing =
        HttpProcessingService::new(config.downstream_url.clone(), config.downstream_timeout)
            .map_err(|e| std::io::Error::other(format!("processing client setup failed: {e}")))?;
    let delegation = DelegationClient::new(Arc::new(processing), config.downstream_timeout);

    #[cfg(feature = "metrics")]
    let delegation = delegation.with_metrics(delegation_metrics(config.prometheus.as_ref())?);

    let directory = UserDirectoryService::new(Arc::new(InMemoryUserStore::new()), delegation);
    Ok(web::Data::new(HttpState::new(Arc::new(directory))))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with binding, downstream, and optional metrics settings.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the downstream client, registering
/// metrics, or binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let bind_addr = config.bind_addr();
    info!(
        %bind_addr,
        downstream_url = %config.downstream_url,
        downstream_timeout_secs = config.downstream_timeout.as_secs(),
        "starting user service"
    );

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(config.prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

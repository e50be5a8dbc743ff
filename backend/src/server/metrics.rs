//! Optional Prometheus wiring: request middleware and delegation counters.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;

use user_service::domain::ports::{DelegationMetrics, NoOpDelegationMetrics};
use user_service::outbound::metrics::PrometheusDelegationMetrics;

/// Delegation counters registered on the middleware's registry, or a no-op
/// sink when metrics are not configured.
///
/// # Errors
/// Returns [`std::io::Error`] if counter registration fails.
pub(crate) fn delegation_metrics(
    prometheus: Option<&PrometheusMetrics>,
) -> std::io::Result<Arc<dyn DelegationMetrics>> {
    match prometheus {
        Some(prom) => {
            let metrics = PrometheusDelegationMetrics::new(&prom.registry).map_err(|e| {
                std::io::Error::other(format!("delegation metrics registration failed: {e}"))
            })?;
            Ok(Arc::new(metrics))
        }
        None => Ok(Arc::new(NoOpDelegationMetrics)),
    }
}

/// Request metrics middleware that can be switched off without changing the
/// app's service type.
#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            Self::Enabled(metrics) => {
                let fut = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(fut.await?)) })
            }
            Self::Disabled => Box::pin(async move {
                let svc = service.map(ServiceResponse::map_into_boxed_body);
                Ok(boxed::service(svc))
            }),
        }
    }
}

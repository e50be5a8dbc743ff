//! Service banner and health endpoints.
//!
//! `/` and `/health` answer unconditionally for simple pings; `/health/ready`
//! and `/health/live` are orchestration probes driven by [`HealthState`].

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Service name reported by the banner and health payloads.
pub const SERVICE_NAME: &str = "user-service";

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceBanner {
    /// Human-readable status line.
    #[schema(example = "User Management Service is running")]
    pub message: String,
    /// Service name.
    #[schema(example = "user-service")]
    pub service: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Always `healthy` while the process serves requests.
    #[schema(example = "healthy")]
    pub status: String,
    /// Service name.
    #[schema(example = "user-service")]
    pub service: String,
}

/// Shared readiness and liveness flags.
///
/// Starts not ready but live; the server marks it ready once wired.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a state that is live but not yet ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready to take traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes, e.g. while draining for shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Current readiness.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Current liveness.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    responses((status = 200, description = "Service is running", body = ServiceBanner))
)]
#[get("/")]
pub async fn root() -> web::Json<ServiceBanner> {
    web::Json(ServiceBanner {
        message: "User Management Service is running".to_owned(),
        service: SERVICE_NAME.to_owned(),
    })
}

/// Plain health check.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses((status = 200, description = "Service is healthy", body = HealthStatus))
)]
#[get("/health")]
pub async fn health() -> web::Json<HealthStatus> {
    web::Json(HealthStatus {
        status: "healthy".to_owned(),
        service: SERVICE_NAME.to_owned(),
    })
}

/// Readiness probe: 200 once the server is wired, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe: 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

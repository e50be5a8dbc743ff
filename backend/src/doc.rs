//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler and the payload schemas it uses.
//! Swagger UI serves the document at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, ProcessedUser, User};
use crate::inbound::http::health::{HealthStatus, ServiceBanner};
use crate::inbound::http::users::{CreateUserRequest, DeleteUserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "User records with best-effort delegation to a processing service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::get_processed_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(
        User,
        ProcessedUser,
        CreateUserRequest,
        DeleteUserResponse,
        ServiceBanner,
        HealthStatus,
        Error,
        ErrorCode
    )),
    tags(
        (name = "users", description = "User records and processing views"),
        (name = "health", description = "Service banner and health probes")
    )
)]
pub struct ApiDoc;

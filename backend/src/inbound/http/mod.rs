//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every route and the JSON extractor configuration.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_service::inbound::http::{self, health::HealthState};
///
/// let app = App::new()
///     .app_data(web::Data::new(HealthState::new()))
///     .configure(http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(health::root)
        .service(health::health)
        .service(health::ready)
        .service(health::live)
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::get_processed_user)
        .service(users::delete_user);
}

//! User service library modules.
//!
//! The service keeps an in-memory directory of user records and delegates
//! per-user processing to a downstream HTTP service on a best-effort basis.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User use cases.
    pub users: Arc<dyn UserDirectory>,
}

impl HttpState {
    /// Construct state from the user directory port.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use user_service::domain::ports::FixtureProcessingService;
    /// use user_service::domain::{DelegationClient, UserDirectoryService};
    /// use user_service::inbound::http::state::HttpState;
    /// use user_service::outbound::memory::InMemoryUserStore;
    ///
    /// let delegation =
    ///     DelegationClient::new(Arc::new(FixtureProcessingService), Duration::from_secs(1));
    /// let service = UserDirectoryService::new(Arc::new(InMemoryUserStore::new()), delegation);
    /// let state = HttpState::new(Arc::new(service));
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }
}

//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod delegation_metrics;
mod processing_service;
mod user_directory;
mod user_store;

#[cfg(test)]
pub use delegation_metrics::MockDelegationMetrics;
pub use delegation_metrics::{
    DelegationCall, DelegationMetrics, DelegationOutcome, NoOpDelegationMetrics,
};
#[cfg(test)]
pub use processing_service::MockProcessingService;
pub use processing_service::{
    FixtureProcessingService, ProcessingService, ProcessingServiceError,
};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};

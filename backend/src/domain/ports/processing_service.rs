//! Driven port for the downstream user-processing service.
//!
//! The domain owns the call shapes; adapters own transport details such as
//! URLs, serialisation, and status-code interpretation.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{ProcessedData, User, UserId};

define_port_error! {
    /// Errors surfaced while talking to the processing service.
    pub enum ProcessingServiceError {
        /// The request never produced a response (connection refused, reset, DNS).
        Transport { message: String } =>
            "processing service transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "processing service timed out: {message}",
        /// The service answered with a non-success status.
        Rejected { status: u16 } =>
            "processing service rejected the request with status {status}",
        /// A success response carried a body that could not be decoded.
        Decode { message: String } =>
            "processing service response decode failed: {message}",
    }
}

/// Port for the three downstream call shapes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessingService: Send + Sync {
    /// Hand a freshly created user to the service for processing.
    async fn submit_user(&self, user: &User) -> Result<(), ProcessingServiceError>;

    /// Look up processing output for `id`.
    ///
    /// Returns `Ok(None)` when the service answers but holds no record.
    async fn fetch_processed(
        &self,
        id: UserId,
    ) -> Result<Option<ProcessedData>, ProcessingServiceError>;

    /// Tell the service that `id` no longer exists locally.
    async fn discard_processed(&self, id: UserId) -> Result<(), ProcessingServiceError>;
}

/// Fixture implementation that accepts everything and knows no records.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureProcessingService;

#[async_trait]
impl ProcessingService for FixtureProcessingService {
    async fn submit_user(&self, _user: &User) -> Result<(), ProcessingServiceError> {
        Ok(())
    }

    async fn fetch_processed(
        &self,
        _id: UserId,
    ) -> Result<Option<ProcessedData>, ProcessingServiceError> {
        Ok(None)
    }

    async fn discard_processed(&self, _id: UserId) -> Result<(), ProcessingServiceError> {
        Ok(())
    }
}

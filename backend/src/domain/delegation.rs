//! Resilient delegation to the downstream processing service.
//!
//! [`DelegationClient`] turns the three downstream intents into bounded calls
//! with a uniform result. Nothing here ever returns an error to the caller:
//! lookups collapse into a [`ProcessingResult`], notifications into a
//! [`NotifyOutcome`] the caller is expected to log.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::ports::{
    DelegationCall, DelegationMetrics, DelegationOutcome, NoOpDelegationMetrics,
    ProcessingService, ProcessingServiceError,
};
use crate::domain::{DelegationStatus, ProcessedData, ProcessedUser, User, UserId};

/// Diagnostic used when a call runs past its deadline.
pub const TIMEOUT_MESSAGE: &str = "timeout";

/// Outcome of a processed-data lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingResult {
    /// The service returned processed data (possibly empty).
    Success(ProcessedData),
    /// The service answered but has no record for the user.
    NotFoundRemote,
    /// The call failed; the message is a short diagnostic.
    Failure(String),
}

impl ProcessingResult {
    /// Join the lookup result with the local record.
    #[must_use]
    pub fn into_processed_user(self, user: User) -> ProcessedUser {
        match self {
            Self::Success(data) => ProcessedUser::success(user, data),
            Self::NotFoundRemote => {
                ProcessedUser::degraded(user, DelegationStatus::NotFoundRemote)
            }
            Self::Failure(message) => {
                ProcessedUser::degraded(user, DelegationStatus::Error(message))
            }
        }
    }
}

/// Outcome of a best-effort notification.
#[must_use = "ignored notifications should be logged at the call site"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The service acknowledged the notification.
    Delivered,
    /// The notification failed and was dropped.
    Ignored {
        /// Why the notification failed.
        reason: String,
    },
}

/// Bounded, non-fatal client for the processing service.
#[derive(Clone)]
pub struct DelegationClient {
    service: Arc<dyn ProcessingService>,
    metrics: Arc<dyn DelegationMetrics>,
    timeout: Duration,
}

impl DelegationClient {
    /// Wrap a processing service port; every call is cut off after `timeout`.
    pub fn new(service: Arc<dyn ProcessingService>, timeout: Duration) -> Self {
        Self {
            service,
            metrics: Arc::new(NoOpDelegationMetrics),
            timeout,
        }
    }

    /// Report call outcomes to `metrics`.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn DelegationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Tell the service about a newly created user.
    pub async fn notify_created(&self, user: &User) -> NotifyOutcome {
        let result = self.bounded(self.service.submit_user(user)).await;
        self.settle_notification(DelegationCall::NotifyCreated, user.id(), result)
    }

    /// Fetch processing output for `id`.
    pub async fn fetch_processed(&self, id: UserId) -> ProcessingResult {
        let call = DelegationCall::FetchProcessed;
        match self.bounded(self.service.fetch_processed(id)).await {
            Ok(Some(data)) => {
                self.metrics.record(call, DelegationOutcome::Delivered);
                ProcessingResult::Success(data)
            }
            Ok(None) => {
                self.metrics.record(call, DelegationOutcome::NotFoundRemote);
                ProcessingResult::NotFoundRemote
            }
            Err(error) => {
                self.metrics.record(call, DelegationOutcome::Failed);
                debug!(user_id = %id, %call, %error, "processed-data lookup failed");
                ProcessingResult::Failure(failure_message(&error))
            }
        }
    }

    /// Tell the service that `id` was deleted locally.
    pub async fn notify_deleted(&self, id: UserId) -> NotifyOutcome {
        let result = self.bounded(self.service.discard_processed(id)).await;
        self.settle_notification(DelegationCall::NotifyDeleted, id, result)
    }

    async fn bounded<T, Fut>(&self, call: Fut) -> Result<T, ProcessingServiceError>
    where
        Fut: Future<Output = Result<T, ProcessingServiceError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(ProcessingServiceError::timeout(format!(
                    "no response within {:?}",
                    self.timeout
                )))
            })
    }

    fn settle_notification(
        &self,
        call: DelegationCall,
        id: UserId,
        result: Result<(), ProcessingServiceError>,
    ) -> NotifyOutcome {
        match result {
            Ok(()) => {
                self.metrics.record(call, DelegationOutcome::Delivered);
                debug!(user_id = %id, %call, "processing service notified");
                NotifyOutcome::Delivered
            }
            Err(error) => {
                self.metrics.record(call, DelegationOutcome::Failed);
                NotifyOutcome::Ignored {
                    reason: error.to_string(),
                }
            }
        }
    }
}

fn failure_message(error: &ProcessingServiceError) -> String {
    match error {
        ProcessingServiceError::Timeout { .. } => TIMEOUT_MESSAGE.to_owned(),
        ProcessingServiceError::Transport { message }
        | ProcessingServiceError::Decode { message } => message.clone(),
        ProcessingServiceError::Rejected { .. } => error.to_string(),
    }
}

#[cfg(test)]
#[path = "delegation_tests.rs"]
mod tests;

//! Port for counting downstream delegation outcomes.
//!
//! Best-effort notifications swallow their failures, so this port is the one
//! place those failures stay observable. Implementations may export to
//! Prometheus or discard everything.

use std::fmt;

/// Which downstream call produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegationCall {
    /// `POST /process-user` after a create.
    NotifyCreated,
    /// `GET /processed-users/{id}`.
    FetchProcessed,
    /// `DELETE /processed-users/{id}` after a delete.
    NotifyDeleted,
}

impl DelegationCall {
    /// Stable label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotifyCreated => "notify_created",
            Self::FetchProcessed => "fetch_processed",
            Self::NotifyDeleted => "notify_deleted",
        }
    }
}

impl fmt::Display for DelegationCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse outcome of one downstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegationOutcome {
    /// The call completed successfully.
    Delivered,
    /// The lookup completed but the service had no record.
    NotFoundRemote,
    /// Transport failure, timeout, rejection, or undecodable payload.
    Failed,
}

impl DelegationOutcome {
    /// Stable label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::NotFoundRemote => "not_found_remote",
            Self::Failed => "failed",
        }
    }
}

/// Metrics sink for delegation outcomes.
///
/// Recording is synchronous and infallible from the caller's point of view;
/// exporters that can fail must log and move on.
#[cfg_attr(test, mockall::automock)]
pub trait DelegationMetrics: Send + Sync {
    /// Count one call outcome.
    fn record(&self, call: DelegationCall, outcome: DelegationOutcome);
}

/// Sink used when metrics are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpDelegationMetrics;

impl DelegationMetrics for NoOpDelegationMetrics {
    fn record(&self, _call: DelegationCall, _outcome: DelegationOutcome) {}
}

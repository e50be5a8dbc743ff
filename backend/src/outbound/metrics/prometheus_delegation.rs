//! Prometheus adapter for delegation outcome metrics.
//!
//! Counts every downstream call by kind and outcome so dropped notifications
//! remain visible on `/metrics`.

use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::ports::{DelegationCall, DelegationMetrics, DelegationOutcome};

/// Prometheus-backed delegation metrics recorder.
///
/// # Metric layout
///
/// - **Name**: `user_service_delegation_calls_total`
/// - **Type**: Counter
/// - **Labels**:
///   - `call`: `notify_created`, `fetch_processed`, or `notify_deleted`
///   - `outcome`: `delivered`, `not_found_remote`, or `failed`
#[derive(Clone)]
pub struct PrometheusDelegationMetrics {
    calls_total: IntCounterVec,
}

impl PrometheusDelegationMetrics {
    /// Create the counter and register it with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let calls_total = IntCounterVec::new(
            Opts::new(
                "user_service_delegation_calls_total",
                "Downstream processing calls by call kind and outcome",
            ),
            &["call", "outcome"],
        )?;
        registry.register(Box::new(calls_total.clone()))?;
        Ok(Self { calls_total })
    }
}

impl DelegationMetrics for PrometheusDelegationMetrics {
    fn record(&self, call: DelegationCall, outcome: DelegationOutcome) {
        self.calls_total
            .with_label_values(&[call.as_str(), outcome.as_str()])
            .inc();
    }
}

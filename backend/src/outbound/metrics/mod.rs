//! Outbound adapters for metrics exporting.
//!
//! Prometheus-backed implementations of domain metrics ports, compiled only
//! with the `metrics` feature.

mod prometheus_delegation;

pub use prometheus_delegation::PrometheusDelegationMetrics;

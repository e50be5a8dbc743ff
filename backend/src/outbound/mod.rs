//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: the process-local user store
//! - **processing**: reqwest client for the downstream processing service
//! - **metrics**: Prometheus-backed metrics exporters (feature-gated)
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod processing;

//! Processing service outbound adapters.
//!
//! This module provides the reqwest implementation of the
//! `ProcessingService` port.

mod dto;
mod http_service;

pub use http_service::HttpProcessingService;

//! DTOs for the processing service wire format.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::ProcessedData;

/// Body of `GET /processed-users/{id}`.
///
/// Only `processed_data` is read; a missing or `null` field decodes as an
/// empty payload. Other fields the service returns are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct ProcessedUserResponseDto {
    #[serde(default)]
    processed_data: Option<BTreeMap<String, Value>>,
}

impl ProcessedUserResponseDto {
    pub(super) fn into_domain(self) -> ProcessedData {
        self.processed_data
            .map(ProcessedData::from)
            .unwrap_or_default()
    }
}

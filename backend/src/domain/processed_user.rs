//! Composite view joining a local user with downstream processing output.
//!
//! A [`ProcessedUser`] is assembled per request and never stored. The
//! downstream payload is kept as an open JSON map because its shape is owned
//! by the processing service.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::User;

/// Open map of processing results keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessedData(BTreeMap<String, Value>);

impl ProcessedData {
    /// An empty payload.
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Whether no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up one field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<BTreeMap<String, Value>> for ProcessedData {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self(value)
    }
}

impl FromIterator<(String, Value)> for ProcessedData {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

const SUCCESS: &str = "success";
const NOT_FOUND_REMOTE: &str = "not_found_remote";
const ERROR_PREFIX: &str = "error:";

/// How the downstream lookup for a [`ProcessedUser`] went.
///
/// Serialised as a bare string: `success`, `not_found_remote`, or
/// `error:<message>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DelegationStatus {
    /// The downstream service returned processed data.
    Success,
    /// The downstream service answered but holds no record for the user.
    NotFoundRemote,
    /// The downstream call failed; the message is a short diagnostic.
    Error(String),
}

impl fmt::Display for DelegationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str(SUCCESS),
            Self::NotFoundRemote => f.write_str(NOT_FOUND_REMOTE),
            Self::Error(message) => write!(f, "{ERROR_PREFIX}{message}"),
        }
    }
}

impl From<DelegationStatus> for String {
    fn from(value: DelegationStatus) -> Self {
        value.to_string()
    }
}

impl From<String> for DelegationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            SUCCESS => Self::Success,
            NOT_FOUND_REMOTE => Self::NotFoundRemote,
            other => Self::Error(
                other
                    .strip_prefix(ERROR_PREFIX)
                    .unwrap_or(other)
                    .to_owned(),
            ),
        }
    }
}

/// A user enriched with downstream processing output.
///
/// ## Invariants
/// - `processed_data` is non-empty only when `delegation_status` is
///   [`DelegationStatus::Success`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcessedUser {
    user: User,
    #[schema(value_type = Object, example = json!({ "score": 5 }))]
    processed_data: ProcessedData,
    #[schema(value_type = String, example = "success")]
    delegation_status: DelegationStatus,
}

impl ProcessedUser {
    /// Successful enrichment carrying downstream data.
    #[must_use]
    pub const fn success(user: User, processed_data: ProcessedData) -> Self {
        Self {
            user,
            processed_data,
            delegation_status: DelegationStatus::Success,
        }
    }

    /// Degraded view with no downstream data.
    ///
    /// Passing [`DelegationStatus::Success`] still yields an empty payload.
    #[must_use]
    pub const fn degraded(user: User, delegation_status: DelegationStatus) -> Self {
        Self {
            user,
            processed_data: ProcessedData::empty(),
            delegation_status,
        }
    }

    /// The local user record.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Downstream processing output.
    #[must_use]
    pub const fn processed_data(&self) -> &ProcessedData {
        &self.processed_data
    }

    /// Outcome of the downstream lookup.
    #[must_use]
    pub const fn delegation_status(&self) -> &DelegationStatus {
        &self.delegation_status
    }
}

//! User records and the candidate submitted on creation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Validation errors raised while building a [`NewUser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// The name was empty or whitespace only.
    #[error("name must not be empty")]
    EmptyName,
}

/// Store-assigned user identifier.
///
/// Identifiers start at 1 and are never reused, so `0` never names a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty user name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and wrap a name.
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyName`] when the trimmed name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Profile fields of a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: UserName,
    /// Contact address; stored as given.
    pub email: String,
    /// Age in years; stored as given.
    pub age: i64,
}

impl NewUser {
    /// Build a candidate from raw request fields.
    ///
    /// # Errors
    /// Returns [`UserValidationError`] when the name is blank.
    pub fn try_from_parts(
        name: impl Into<String>,
        email: impl Into<String>,
        age: i64,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: email.into(),
            age,
        })
    }
}

/// A stored user record.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - `name` is non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(value_type = u64, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "Ana")]
    name: UserName,
    #[schema(example = "a@x.com")]
    email: String,
    #[schema(example = 30)]
    age: i64,
}

impl User {
    /// Attach a store-assigned identifier to a candidate.
    #[must_use]
    pub fn new(id: UserId, candidate: NewUser) -> Self {
        let NewUser { name, email, age } = candidate;
        Self {
            id,
            name,
            email,
            age,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Age in years.
    #[must_use]
    pub const fn age(&self) -> i64 {
        self.age
    }
}

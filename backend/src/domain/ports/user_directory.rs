//! Driving port exposing the user use cases to inbound adapters.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, ProcessedUser, User, UserId};

/// Use cases served over HTTP.
///
/// Downstream failures never surface as `Err`; the only error a caller can
/// observe is [`crate::domain::ErrorCode::NotFound`] for unknown ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Store a new user and notify the processing service.
    async fn create_user(&self, candidate: NewUser) -> User;

    /// All users in insertion order.
    async fn list_users(&self) -> Vec<User>;

    /// One user by id.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// One user joined with downstream processing output.
    async fn get_processed_user(&self, id: UserId) -> Result<ProcessedUser, Error>;

    /// Remove a user, notify the processing service, and return the removed
    /// record.
    async fn delete_user(&self, id: UserId) -> Result<User, Error>;
}

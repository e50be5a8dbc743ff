//! Driven port owning the authoritative collection of user records.

use super::define_port_error;
use crate::domain::{NewUser, User, UserId};

define_port_error! {
    /// Errors surfaced by user store lookups and removals.
    pub enum UserStoreError {
        /// No record carries the requested identifier.
        NotFound { id: UserId } => "user {id} not found",
    }
}

/// Synchronised record store with monotonic id assignment.
///
/// Implementations must serialise id assignment, insertion, and removal
/// under one discipline so concurrent callers never observe duplicate ids
/// or a partially updated collection. No method may block on I/O.
#[cfg_attr(test, mockall::automock)]
pub trait UserStore: Send + Sync {
    /// Assign the next identifier to `candidate`, append it, and return the
    /// stored record. Identifiers start at 1 and are never reused.
    fn create(&self, candidate: NewUser) -> User;

    /// All current records in insertion order.
    fn list(&self) -> Vec<User>;

    /// Fetch one record.
    ///
    /// # Errors
    /// [`UserStoreError::NotFound`] when no record carries `id`.
    fn get(&self, id: UserId) -> Result<User, UserStoreError>;

    /// Remove one record and hand it back.
    ///
    /// # Errors
    /// [`UserStoreError::NotFound`] when no record carries `id`.
    fn delete(&self, id: UserId) -> Result<User, UserStoreError>;
}

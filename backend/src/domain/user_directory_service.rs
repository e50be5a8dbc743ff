//! User directory domain service.
//!
//! Implements the [`UserDirectory`] driving port on top of a local
//! [`UserStore`] and the downstream [`DelegationClient`]. The local store is
//! authoritative: downstream trouble is logged and never changes the result of
//! a local operation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::delegation::{DelegationClient, NotifyOutcome};
use crate::domain::ports::{DelegationCall, UserDirectory, UserStore, UserStoreError};
use crate::domain::{Error, NewUser, ProcessedUser, User, UserId};

const USER_NOT_FOUND: &str = "User not found";

fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::NotFound { id } => {
            Error::not_found(USER_NOT_FOUND).with_details(json!({ "id": id.get() }))
        }
    }
}

fn log_ignored(call: DelegationCall, id: UserId, outcome: NotifyOutcome) {
    if let NotifyOutcome::Ignored { reason } = outcome {
        warn!(user_id = %id, %call, %reason, "processing service notification dropped");
    }
}

/// Orchestrates local user records and best-effort downstream delegation.
#[derive(Clone)]
pub struct UserDirectoryService<S> {
    store: Arc<S>,
    delegation: DelegationClient,
}

impl<S> UserDirectoryService<S> {
    /// Create a service over `store`, delegating through `delegation`.
    pub fn new(store: Arc<S>, delegation: DelegationClient) -> Self {
        Self { store, delegation }
    }
}

#[async_trait]
impl<S> UserDirectory for UserDirectoryService<S>
where
    S: UserStore,
{
    async fn create_user(&self, candidate: NewUser) -> User {
        let user = self.store.create(candidate);
        info!(user_id = %user.id(), "user created");

        let outcome = self.delegation.notify_created(&user).await;
        log_ignored(DelegationCall::NotifyCreated, user.id(), outcome);
        user
    }

    async fn list_users(&self) -> Vec<User> {
        self.store.list()
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.store.get(id).map_err(map_store_error)
    }

    async fn get_processed_user(&self, id: UserId) -> Result<ProcessedUser, Error> {
        // Unknown ids short-circuit before any downstream traffic.
        let user = self.store.get(id).map_err(map_store_error)?;
        let result = self.delegation.fetch_processed(id).await;
        Ok(result.into_processed_user(user))
    }

    async fn delete_user(&self, id: UserId) -> Result<User, Error> {
        let removed = self.store.delete(id).map_err(map_store_error)?;
        info!(user_id = %id, "user deleted");

        let outcome = self.delegation.notify_deleted(id).await;
        log_ignored(DelegationCall::NotifyDeleted, id, outcome);
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;

//! Reqwest-backed processing service adapter.
//!
//! This adapter owns transport details only: endpoint layout, JSON encoding,
//! timeout and status mapping. Deciding what a failure means for the caller
//! is left to the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};

use super::dto::ProcessedUserResponseDto;
use crate::domain::ports::{ProcessingService, ProcessingServiceError};
use crate::domain::{ProcessedData, User, UserId};

const PROCESS_USER_PATH: &str = "process-user";
const PROCESSED_USERS_PATH: &str = "processed-users";

/// Processing service adapter speaking JSON over HTTP to one base URL.
#[derive(Debug, Clone)]
pub struct HttpProcessingService {
    client: Client,
    base_url: String,
}

impl HttpProcessingService {
    /// Build an adapter whose reqwest client enforces `timeout` per request.
    /// ```rust,ignore
    /// let service = HttpProcessingService::new(base_url, Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// Base URL every endpoint is resolved against, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn processed_user_endpoint(&self, id: UserId) -> String {
        self.endpoint(&format!("{PROCESSED_USERS_PATH}/{id}"))
    }
}

#[async_trait]
impl ProcessingService for HttpProcessingService {
    async fn submit_user(&self, user: &User) -> Result<(), ProcessingServiceError> {
        let response = self
            .client
            .post(self.endpoint(PROCESS_USER_PATH))
            .json(user)
            .send()
            .await
            .map_err(map_transport_error)?;
        require_success(&response)
    }

    async fn fetch_processed(
        &self,
        id: UserId,
    ) -> Result<Option<ProcessedData>, ProcessingServiceError> {
        let response = self
            .client
            .get(self.processed_user_endpoint(id))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_processed(body.as_ref()).map(Some)
    }

    async fn discard_processed(&self, id: UserId) -> Result<(), ProcessingServiceError> {
        let response = self
            .client
            .delete(self.processed_user_endpoint(id))
            .send()
            .await
            .map_err(map_transport_error)?;
        require_success(&response)
    }
}

fn require_success(response: &Response) -> Result<(), ProcessingServiceError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ProcessingServiceError::rejected(status.as_u16()))
    }
}

fn parse_processed(body: &[u8]) -> Result<ProcessedData, ProcessingServiceError> {
    serde_json::from_slice::<ProcessedUserResponseDto>(body)
        .map(ProcessedUserResponseDto::into_domain)
        .map_err(|error| {
            ProcessingServiceError::decode(format!("invalid processed user payload: {error}"))
        })
}

fn map_transport_error(error: reqwest::Error) -> ProcessingServiceError {
    if error.is_timeout() {
        ProcessingServiceError::timeout(error.to_string())
    } else {
        ProcessingServiceError::transport(error.to_string())
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::types::{BookingRequest, BookingResult, ImageDescriptor};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed.
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self { ApiError::Transport(e.to_string()) }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self { ApiError::Malformed(e.to_string()) }
}

/// The two calls the landing page makes against the backend.
#[async_trait]
pub trait EventApi: Send + Sync {
    async fn fetch_gallery(&self) -> Result<Vec<ImageDescriptor>, ApiError>;
    async fn submit_booking(&self, req: &BookingRequest) -> Result<BookingResult, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: String,
}

impl HttpApi {
    /// `base` is a resolved API_BASE without a trailing slash.
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(client: Client, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { client, base }
    }

    pub fn base(&self) -> &str { &self.base }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}/", self.base, path.trim_matches('/'))
    }
}

// Non-2xx is a failure before the body is looked at.
async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ApiError> {
    let status = res.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    let body = res.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl EventApi for HttpApi {
    async fn fetch_gallery(&self) -> Result<Vec<ImageDescriptor>, ApiError> {
        let url = self.endpoint("gallery");
        debug!(%url, "GET gallery");
        let res = self.client.get(&url).send().await?;
        read_json(res).await
    }

    async fn submit_booking(&self, req: &BookingRequest) -> Result<BookingResult, ApiError> {
        let url = self.endpoint("booking");
        debug!(%url, "POST booking");
        let res = self.client.post(&url).json(req).send().await?;
        read_json(res).await
    }
}

//! HTTP client for the sync API.
//!
//! The loops talk to the server through the [`SyncApi`] trait so tests can
//! substitute an in-process mock. [`HttpSyncApi`] is the real transport.
//! No per-request timeout is set; a hung request just delays its loop.

use location::{User, UserId, WireMapView};
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered 405: the published view failed validation.
    #[error("map view rejected by server")]
    Rejected,
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),
}

/// Result of a fetch that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Raw response body; callers validate it before use.
    Found(Value),
    NotFound,
}

#[async_trait::async_trait]
pub trait SyncApi: Send + Sync {
    /// `GET /user`: obtain a fresh identifier.
    async fn create_user(&self) -> Result<User, ApiError>;

    /// `PUT /user/{id}`: publish a view in wire form.
    async fn publish(&self, id: &UserId, view: &WireMapView) -> Result<(), ApiError>;

    /// `GET /user/{id}`: latest published view, unvalidated.
    async fn fetch(&self, id: &UserId) -> Result<FetchOutcome, ApiError>;
}

pub struct HttpSyncApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSyncApi {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    fn create_url(&self) -> String {
        format!("{}/user", self.base_url)
    }

    fn user_url(&self, id: &UserId) -> String {
        format!("{}/user/{id}", self.base_url)
    }
}

#[async_trait::async_trait]
impl SyncApi for HttpSyncApi {
    async fn create_user(&self) -> Result<User, ApiError> {
        let response = self.client.get(self.create_url()).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus(status.as_u16()));
        }
        Ok(response.json::<User>().await?)
    }

    async fn publish(&self, id: &UserId, view: &WireMapView) -> Result<(), ApiError> {
        let response = self.client.put(self.user_url(id)).json(view).send().await?;
        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::METHOD_NOT_ALLOWED => Err(ApiError::Rejected),
            other => Err(ApiError::UnexpectedStatus(other.as_u16())),
        }
    }

    async fn fetch(&self, id: &UserId) -> Result<FetchOutcome, ApiError> {
        let response = self.client.get(self.user_url(id)).send().await?;
        match response.status() {
            StatusCode::OK => Ok(FetchOutcome::Found(response.json::<Value>().await?)),
            StatusCode::NOT_FOUND => Ok(FetchOutcome::NotFound),
            other => Err(ApiError::UnexpectedStatus(other.as_u16())),
        }
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

//! Client for the sales REST API.
//!
//! Every operation issues exactly one request through a [`Transport`], treats
//! any non-2xx status as a failure and never retries. Deletes take an explicit
//! [`Confirmation`] so a declined prompt never reaches the network.

mod cars;
mod clients;
mod http;
#[cfg(test)]
pub mod mock;
mod orders;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::ValidationError;

pub use http::HttpTransport;

const SERVER_ERROR_MESSAGE: &str =
    "Error communicating with the server. Contact the system administrator.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// Text for the blocking alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            other => format!("{} ({})", SERVER_ERROR_MESSAGE, other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Answer to an interactive "really delete?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

pub struct ApiClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let method = request.method.clone();
        let path = request.path.clone();

        let response = self.transport.send(request).await.map_err(|err| {
            warn!(%method, %path, error = %err, "request failed");
            err
        })?;

        if !response.is_success() {
            warn!(%method, %path, status = response.status, "server rejected request");
            return Err(ApiError::Status(response.status));
        }

        debug!(%method, %path, status = response.status, "request succeeded");
        Ok(response)
    }

    async fn get_json<R: DeserializeOwned>(&self, path: String) -> Result<R, ApiError> {
        let response = self
            .send(ApiRequest {
                method: Method::GET,
                path,
                body: None,
            })
            .await?;

        serde_json::from_str(&response.body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn send_json<B: Serialize>(&self, method: Method, path: String, body: &B) -> Result<(), ApiError> {
        let body = serde_json::to_value(body).map_err(|err| ApiError::Encode(err.to_string()))?;
        self.send(ApiRequest {
            method,
            path,
            body: Some(body),
        })
        .await?;

        Ok(())
    }

    async fn delete_path(&self, path: String, confirmation: Confirmation) -> Result<DeleteOutcome, ApiError> {
        if confirmation == Confirmation::Declined {
            debug!(%path, "delete declined by user");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.send(ApiRequest {
            method: Method::DELETE,
            path,
            body: None,
        })
        .await?;

        Ok(DeleteOutcome::Deleted)
    }
}

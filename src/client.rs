// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! HTTP client for the fitness REST backend
//!
//! Every call resolves the base URL afresh and targets `{base}/api/{resource}/`.
//! Responses are returned unnormalized; callers decide how to read collection shapes.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use crate::config::BaseUrlSource;
use crate::constants::backend::API_PREFIX;
use crate::logging::AppLogger;
use crate::models::Resource;

/// Failures of a backend call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Failed to reach the fitness API: {0}")]
    Transport(String),

    /// Non-2xx status on a read
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Non-2xx status on a write, with the server's reason when it gave one
    #[error("{}", rejection_message(*status, detail.as_deref()))]
    Rejected { status: u16, detail: Option<String> },

    /// A 2xx response whose body is not JSON
    #[error("Invalid response from the fitness API: {0}")]
    Decode(String),

    /// Base URL and path segments did not form a valid request URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

fn rejection_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => detail.to_string(),
        None => format!("HTTP error! status: {}", status),
    }
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } | ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Operations the dashboard needs from the fitness backend
#[async_trait]
pub trait FitnessApi: Send + Sync {
    /// `GET {base}/api/{resource}/`
    async fn list(&self, resource: Resource) -> Result<Value, ApiError>;

    /// `PATCH {base}/api/{resource}/{id}/` with the given fields
    async fn update(&self, resource: Resource, id: &str, fields: Value) -> Result<Value, ApiError>;
}

/// reqwest-backed [`FitnessApi`]
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: BaseUrlSource,
}

impl HttpApiClient {
    pub fn new(base_url: BaseUrlSource) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Client that follows the workspace environment rule
    pub fn from_env() -> Self {
        Self::new(BaseUrlSource::Environment)
    }

    /// Client pinned to one base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(BaseUrlSource::Fixed(base_url.into()))
    }

    /// Fully qualified URL for a collection, or a record within it
    ///
    /// Path segments are percent-encoded; the trailing slash is kept.
    pub fn resource_url(&self, resource: Resource, id: Option<&str>) -> Result<url::Url, ApiError> {
        let base = self.base_url.resolve();
        let mut url =
            url::Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base, e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(base.clone()))?;
            segments.pop_if_empty();
            segments.push(API_PREFIX).push(resource.path_segment());
            if let Some(id) = id {
                segments.push(id);
            }
            // Empty last segment yields the trailing slash
            segments.push("");
        }
        Ok(url)
    }
}

#[async_trait]
impl FitnessApi for HttpApiClient {
    async fn list(&self, resource: Resource) -> Result<Value, ApiError> {
        let url = self.resource_url(resource, None)?;
        debug!("Fetching {} from: {}", resource, url);

        let started = Instant::now();
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                AppLogger::log_backend_request(
                    "GET",
                    url.as_str(),
                    None,
                    started.elapsed().as_millis() as u64,
                );
                return Err(ApiError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        AppLogger::log_backend_request(
            "GET",
            url.as_str(),
            Some(status.as_u16()),
            started.elapsed().as_millis() as u64,
        );
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn update(&self, resource: Resource, id: &str, fields: Value) -> Result<Value, ApiError> {
        let url = self.resource_url(resource, Some(id))?;
        debug!("Updating {} {} at: {}", resource, id, url);

        let started = Instant::now();
        let response = match self.client.patch(url.clone()).json(&fields).send().await {
            Ok(response) => response,
            Err(e) => {
                AppLogger::log_backend_request(
                    "PATCH",
                    url.as_str(),
                    None,
                    started.elapsed().as_millis() as u64,
                );
                return Err(ApiError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        AppLogger::log_backend_request(
            "PATCH",
            url.as_str(),
            Some(status.as_u16()),
            started.elapsed().as_millis() as u64,
        );

        // Unreadable bodies are tolerated on both paths: the error message falls back to
        // the status, and callers only use a success to confirm the write happened.
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }
}

/// Pull a human-readable `detail` string out of an error body
pub fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_string)
        .filter(|detail| !detail.is_empty())
}

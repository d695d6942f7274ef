//! HTTP transport used by the catalog clients.

use super::error::ApiError;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// A single GET request against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Full address without the query string
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Look up a query parameter by name.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Performs a request and hands back the decoded JSON body.
pub trait Transport: Send + Sync {
    fn get(&self, request: &ApiRequest) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        debug!(url = %request.url, query = ?request.query, "Making API request");

        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let text = if is_failure(status) {
            response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string())
        } else {
            response.text().await?
        };

        decode_response(&request.url, status, text)
    }
}

fn is_failure(status: u16) -> bool {
    status >= 400
}

/// Turn a status code and body into the decoded JSON or a transport error.
fn decode_response(url: &str, status: u16, text: String) -> Result<Value, ApiError> {
    if is_failure(status) {
        warn!(url = %url, status, "Request failed");
        return Err(ApiError::Status {
            url: url.to_string(),
            status,
            body: text,
        });
    }

    let body: Value = serde_json::from_str(&text).map_err(|e| ApiError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    debug!(url = %url, "Request successful");
    Ok(body)
}

//! reqwest-backed transport for processor requests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{
    Client, Method,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use std::fmt;

use crate::response::RawResponse;

/// A single request to the processor.
///
/// The body carries the secret key, so `Debug` only shows method and URL.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Value,
}

impl ApiRequest {
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            query: Vec::new(),
            body,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Sends a request and hands back status and body, whatever the status.
///
/// An `Err` means no usable response arrived (connection refused, DNS
/// failure, body read error).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// Transport over a shared reqwest [`Client`].
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Posts a fire-and-forget JSON payload, failing on non-2xx.
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<()> {
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        debug!("{} {}...", request.method, request.url);

        let response = self
            .client
            .request(request.method, &request.url)
            .query(&request.query)
            .json(&request.body)
            .send()
            .await
            .context("Failed to send request to the card API")?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read response body from the card API")?;

        debug!("Received HTTP {} ({} bytes)", status, body.len());

        Ok(RawResponse { status, body })
    }
}

/// Builds the HTTP client used for every processor call.
pub fn build_http_client() -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .user_agent(concat!("ravecard/", env!("RAVECARD_VERSION")))
        .default_headers(headers)
        .build()?;

    Ok(HttpClient::new(client))
}

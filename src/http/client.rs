//! HTTP client for the Content Delivery API
//!
//! A thin wrapper over `reqwest` that:
//! - Applies default headers and bearer authentication
//! - Classifies non-2xx responses as [`Error::HttpStatus`]
//! - Decodes the response body as JSON
//!
//! Failed requests are returned unchanged; nothing is retried.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// `Accept` header sent with every request
pub const ACCEPT_JSON: &str = "application/json; charset=utf-8";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Client-wide request timeout (none by default)
    pub timeout: Option<Duration>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert(header::ACCEPT.as_str().to_string(), ACCEPT_JSON.to_string());

        Self {
            timeout: None,
            default_headers,
            user_agent: format!("contentful-delivery/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Token sent as `Authorization: Bearer ...`
    pub bearer_token: Option<String>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Authenticate with a bearer token
    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Something that can GET a URL and hand back decoded JSON
///
/// The adapter talks to this trait so tests can observe requests without a
/// network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request and decode the JSON body
    async fn get_json(&self, url: &str, config: RequestConfig) -> Result<Value>;
}

/// HTTP client for read-only GET requests
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str, config: RequestConfig) -> Result<Response> {
        let mut req = self.client.get(url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(ref token) = config.bearer_token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed: GET {} -> {}", url, status.as_u16());
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: GET {}", url);
        Ok(response)
    }

    /// Make a GET request and parse the JSON response
    pub async fn get_typed<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.get(url, config).await?;
        let json: T = response.json().await?;
        Ok(json)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get_json(&self, url: &str, config: RequestConfig) -> Result<Value> {
        self.get_typed(url, config).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

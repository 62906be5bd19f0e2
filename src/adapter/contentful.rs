//! Content Delivery API adapter
//!
//! Translates store operations into GET requests against the space's
//! `entries` and `assets` collections and returns the decoded JSON body
//! untouched. Normalization happens in [`crate::serializer`].

use super::content_type::ContentTypeResolver;
use super::query::ContentRequest;
use super::request::RequestBuilder;
use crate::config::ResolvedConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig, Transport};
use crate::types::QueryParams;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read-only adapter for the Content Delivery and Preview APIs
pub struct ContentfulAdapter {
    config: ResolvedConfig,
    transport: Arc<dyn Transport>,
    requests: RequestBuilder,
}

impl ContentfulAdapter {
    /// Create an adapter sending requests through a default [`HttpClient`]
    pub fn new(config: ResolvedConfig) -> Result<Self> {
        let client = HttpClient::new()?;
        Ok(Self::with_transport(config, Arc::new(client)))
    }

    /// Create an adapter with a custom transport
    pub fn with_transport(config: ResolvedConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            requests: RequestBuilder::default(),
        }
    }

    /// Replace the model name to content type mapping
    #[must_use]
    pub fn with_content_types(mut self, resolver: impl ContentTypeResolver + 'static) -> Self {
        self.requests = RequestBuilder::new(resolver);
        self
    }

    /// The resolved configuration
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Several find-record calls may be batched into one find-many call
    pub fn coalesce_find_requests(&self) -> bool {
        true
    }

    /// Request builders using this adapter's content type mapping
    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    /// Content type id sent for a model
    pub fn content_type_param(&self, model_name: &str) -> String {
        self.requests.content_type_param(model_name)
    }

    // ========================================================================
    // Store operations
    // ========================================================================

    /// Fetch a single record
    pub async fn find_record(&self, model_name: &str, id: &str) -> Result<Value> {
        self.get_content(&self.requests.find_record_request(model_name, id))
            .await
    }

    /// Fetch several records by id
    pub async fn find_many<S: AsRef<str> + Sync>(
        &self,
        model_name: &str,
        ids: &[S],
    ) -> Result<Value> {
        self.get_content(&self.requests.find_many_request(model_name, ids))
            .await
    }

    /// Fetch every record of a model
    pub async fn find_all(&self, model_name: &str) -> Result<Value> {
        self.get_content(&self.requests.find_all_request(model_name)).await
    }

    /// Fetch records matching a query
    pub async fn query(&self, model_name: &str, query: QueryParams) -> Result<Value> {
        self.get_content(&self.requests.query_request(model_name, query))
            .await
    }

    /// Fetch the first record matching a query
    pub async fn query_record(&self, model_name: &str, query: QueryParams) -> Result<Value> {
        self.get_content(&self.requests.query_record_request(model_name, query))
            .await
    }

    /// Not available on the Content Delivery API
    pub async fn create_record(&self, model_name: &str, _record: &Value) -> Result<Value> {
        Err(unsupported("createRecord", model_name))
    }

    /// Not available on the Content Delivery API
    pub async fn update_record(&self, model_name: &str, _record: &Value) -> Result<Value> {
        Err(unsupported("updateRecord", model_name))
    }

    /// Not available on the Content Delivery API
    pub async fn delete_record(&self, model_name: &str, _id: &str) -> Result<Value> {
        Err(unsupported("deleteRecord", model_name))
    }

    /// Send a request with the configured credentials
    pub async fn get_content(&self, request: &ContentRequest) -> Result<Value> {
        let url = request.url(&self.config);
        debug!(api = %self.config.api, path = %request.path, "GET {}", url);

        let config = RequestConfig::new().bearer(self.config.access_token.as_str());
        self.transport.get_json(&url, config).await
    }
}

fn unsupported(operation: &str, model_name: &str) -> Error {
    warn!(
        model = model_name,
        "{operation} requires the Content Management API, which is not implemented"
    );
    Error::unsupported(operation)
}

impl std::fmt::Debug for ContentfulAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentfulAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

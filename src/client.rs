//! High-level client
//!
//! [`ContentfulClient`] pairs the adapter with the serializer so a caller can
//! go from a store operation straight to a normalized [`Document`].

use crate::adapter::{ContentTypeResolver, ContentfulAdapter};
use crate::config::{RawConfig, ResolvedConfig};
use crate::error::Result;
use crate::http::Transport;
use crate::serializer::{ContentfulSerializer, Document, ModelSchema};
use crate::types::{QueryParams, RequestType};
use std::sync::Arc;

/// Adapter plus serializer
#[derive(Debug)]
pub struct ContentfulClient {
    adapter: ContentfulAdapter,
    serializer: ContentfulSerializer,
}

impl ContentfulClient {
    /// Create a client from a resolved config
    pub fn new(config: ResolvedConfig) -> Result<Self> {
        Ok(Self {
            adapter: ContentfulAdapter::new(config)?,
            serializer: ContentfulSerializer::new(),
        })
    }

    /// Resolve a raw config and create a client
    pub fn from_raw_config(config: RawConfig) -> Result<Self> {
        Self::new(config.resolve()?)
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: ResolvedConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            adapter: ContentfulAdapter::with_transport(config, transport),
            serializer: ContentfulSerializer::new(),
        }
    }

    /// Register a model's relationship declarations
    #[must_use]
    pub fn with_model(mut self, schema: ModelSchema) -> Self {
        self.serializer.register(schema);
        self
    }

    /// Replace the model name to content type mapping
    #[must_use]
    pub fn with_content_types(mut self, resolver: impl ContentTypeResolver + 'static) -> Self {
        self.adapter = self.adapter.with_content_types(resolver);
        self
    }

    /// The underlying adapter
    pub fn adapter(&self) -> &ContentfulAdapter {
        &self.adapter
    }

    /// The underlying serializer
    pub fn serializer(&self) -> &ContentfulSerializer {
        &self.serializer
    }

    /// Fetch and normalize a single record
    pub async fn find_record(&self, model_name: &str, id: &str) -> Result<Document> {
        let payload = self.adapter.find_record(model_name, id).await?;
        self.normalize(model_name, &payload, RequestType::FindRecord)
    }

    /// Fetch and normalize several records by id
    pub async fn find_many<S: AsRef<str> + Sync>(
        &self,
        model_name: &str,
        ids: &[S],
    ) -> Result<Document> {
        let payload = self.adapter.find_many(model_name, ids).await?;
        self.normalize(model_name, &payload, RequestType::FindMany)
    }

    /// Fetch and normalize every record of a model
    pub async fn find_all(&self, model_name: &str) -> Result<Document> {
        let payload = self.adapter.find_all(model_name).await?;
        self.normalize(model_name, &payload, RequestType::FindAll)
    }

    /// Fetch and normalize records matching a query
    pub async fn query(&self, model_name: &str, query: QueryParams) -> Result<Document> {
        let payload = self.adapter.query(model_name, query).await?;
        self.normalize(model_name, &payload, RequestType::Query)
    }

    /// Fetch and normalize the first record matching a query
    pub async fn query_record(&self, model_name: &str, query: QueryParams) -> Result<Document> {
        let payload = self.adapter.query_record(model_name, query).await?;
        self.normalize(model_name, &payload, RequestType::QueryRecord)
    }

    fn normalize(
        &self,
        model_name: &str,
        payload: &serde_json::Value,
        request_type: RequestType,
    ) -> Result<Document> {
        let model = self.serializer.model_for(model_name);
        self.serializer
            .normalize_response(&model, Some(payload), request_type)
    }
}

//! Request builders for the store operations
//!
//! Builders only need the content type mapping, so a URL can be computed
//! without a transport.

use super::content_type::{ContentTypeResolver, IdentityContentType};
use super::query::{ContentRequest, CONTENT_TYPE, LIMIT, SKIP, SYS_ID_IN};
use crate::types::{QueryParams, ResourceCollection};

/// Turns store operations into [`ContentRequest`]s
pub struct RequestBuilder {
    content_types: Box<dyn ContentTypeResolver>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(IdentityContentType)
    }
}

impl RequestBuilder {
    /// Create a builder with a content type mapping
    pub fn new(resolver: impl ContentTypeResolver + 'static) -> Self {
        Self {
            content_types: Box::new(resolver),
        }
    }

    /// Content type id sent for a model
    pub fn content_type_param(&self, model_name: &str) -> String {
        self.content_types.content_type_param(model_name)
    }

    /// `GET /{collection}/{id}/`
    pub fn find_record_request(&self, model_name: &str, id: &str) -> ContentRequest {
        let collection = ResourceCollection::for_model(model_name);
        ContentRequest::new(format!("{collection}/{}", urlencoding::encode(id)))
    }

    /// `GET /{collection}/?sys.id[in]=a,b,c`
    pub fn find_many_request<S: AsRef<str>>(&self, model_name: &str, ids: &[S]) -> ContentRequest {
        let collection = ResourceCollection::for_model(model_name);
        let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        ContentRequest::new(collection.as_str()).param(SYS_ID_IN, ids.join(","))
    }

    /// `GET /{collection}/?content_type=...`
    pub fn find_all_request(&self, model_name: &str) -> ContentRequest {
        self.scoped_request(model_name, QueryParams::new())
    }

    /// `GET /{collection}/?content_type=...&{query}`
    pub fn query_request(&self, model_name: &str, query: QueryParams) -> ContentRequest {
        self.scoped_request(model_name, query)
    }

    /// Like [`Self::query_request`], restricted to the first match
    pub fn query_record_request(&self, model_name: &str, query: QueryParams) -> ContentRequest {
        self.scoped_request(model_name, query)
            .param(LIMIT, "1")
            .param(SKIP, "0")
    }

    /// Request against the model's collection with `content_type` set
    fn scoped_request(&self, model_name: &str, mut query: QueryParams) -> ContentRequest {
        let collection = ResourceCollection::for_model(model_name);
        query.insert(CONTENT_TYPE.to_string(), self.content_type_param(model_name));
        ContentRequest::with_params(collection.as_str(), query)
    }
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder").finish_non_exhaustive()
    }
}

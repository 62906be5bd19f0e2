//! Request descriptions and query-string serialization

use crate::config::ResolvedConfig;
use crate::types::QueryParams;
use std::collections::HashMap;

/// Query parameter selecting records by id
pub const SYS_ID_IN: &str = "sys.id[in]";

/// Query parameter selecting a content type
pub const CONTENT_TYPE: &str = "content_type";

/// Query parameter limiting the page size
pub const LIMIT: &str = "limit";

/// Query parameter offsetting the page
pub const SKIP: &str = "skip";

/// A GET against the space, before the host and credentials are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    /// Path below the space, e.g. `entries` or `assets/2`
    pub path: String,
    /// Query parameters
    pub params: QueryParams,
}

impl ContentRequest {
    /// Create a request without parameters
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: HashMap::new(),
        }
    }

    /// Create a request with parameters
    pub fn with_params(path: impl Into<String>, params: QueryParams) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }

    /// Set a parameter, replacing any previous value
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Full request URL: `{space_url}/{path}/{query}`
    pub fn url(&self, config: &ResolvedConfig) -> String {
        format!(
            "{}/{}/{}",
            config.space_url(),
            self.path,
            serialize_query_params(&self.params)
        )
    }
}

/// Serialize parameters into a query string
///
/// Each key and value is percent-encoded on its own. An empty map gives an
/// empty string rather than a lone `?`. Parameter order follows map iteration
/// and is therefore unspecified.
pub fn serialize_query_params(params: &QueryParams) -> String {
    if params.is_empty() {
        return String::new();
    }

    let pairs: Vec<String> = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect();

    format!("?{}", pairs.join("&"))
}

/// Render a JSON query value the way it should appear in a query string
///
/// Strings are used as-is, arrays are comma-joined, everything else uses its
/// JSON text.
pub fn query_value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(query_value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Convert a JSON object of query values into [`QueryParams`]
pub fn query_params_from_json(object: &serde_json::Map<String, serde_json::Value>) -> QueryParams {
    object
        .iter()
        .map(|(key, value)| (key.clone(), query_value_to_string(value)))
        .collect()
}

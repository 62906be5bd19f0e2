//! Common types used throughout contentful-delivery
//!
//! Shared type aliases and the small enums that both the adapter and the
//! serializer need to agree on.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Query parameters sent to the Content Delivery API
///
/// Iteration order is unspecified, so the serialized query string is too.
pub type QueryParams = StringMap;

// ============================================================================
// Model names
// ============================================================================

/// Model name used for Contentful assets
pub const ASSET_MODEL_NAME: &str = "contentful-asset";

/// Short alias accepted for the asset model
pub const ASSET_MODEL_ALIAS: &str = "asset";

/// Check whether a model name refers to Contentful assets
pub fn is_asset_model(model_name: &str) -> bool {
    model_name == ASSET_MODEL_NAME || model_name == ASSET_MODEL_ALIAS
}

// ============================================================================
// Resource Collections
// ============================================================================

/// The two collections exposed by the Content Delivery API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCollection {
    /// `/entries`
    Entries,
    /// `/assets`
    Assets,
}

impl ResourceCollection {
    /// Resolve the collection a model name is stored in
    pub fn for_model(model_name: &str) -> Self {
        if is_asset_model(model_name) {
            Self::Assets
        } else {
            Self::Entries
        }
    }

    /// Path segment for this collection
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entries => "entries",
            Self::Assets => "assets",
        }
    }
}

impl fmt::Display for ResourceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// API Host
// ============================================================================

/// Which delivery API host to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Api {
    /// Published content (`cdn.contentful.com`)
    #[default]
    Cdn,
    /// Draft content (`preview.contentful.com`)
    Preview,
}

impl Api {
    /// Host subdomain for this API
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cdn => "cdn",
            Self::Preview => "preview",
        }
    }

    /// Base URL for this API
    pub fn base_url(self) -> String {
        format!("https://{}.contentful.com", self.as_str())
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Store operation a payload was fetched for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestType {
    /// Single record by id
    FindRecord,
    /// Several records by id
    FindMany,
    /// Every record of a content type
    FindAll,
    /// Records matching a query
    Query,
    /// First record matching a query
    QueryRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("asset", ResourceCollection::Assets)]
    #[test_case("contentful-asset", ResourceCollection::Assets)]
    #[test_case("post", ResourceCollection::Entries)]
    #[test_case("author", ResourceCollection::Entries)]
    #[test_case("assets", ResourceCollection::Entries)]
    #[test_case("", ResourceCollection::Entries)]
    fn test_collection_for_model(model: &str, expected: ResourceCollection) {
        assert_eq!(ResourceCollection::for_model(model), expected);
    }

    #[test]
    fn test_api_base_url() {
        assert_eq!(Api::Cdn.base_url(), "https://cdn.contentful.com");
        assert_eq!(Api::Preview.base_url(), "https://preview.contentful.com");
        assert_eq!(Api::default(), Api::Cdn);
    }
}

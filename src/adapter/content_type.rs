//! Model name to content type mapping
//!
//! Model names and Contentful content type ids often differ (`blog-post` vs
//! `blogPost`). The adapter asks a [`ContentTypeResolver`] every time it needs
//! a `content_type` parameter.

use std::collections::HashMap;

/// Maps a model name to the `content_type` query parameter
pub trait ContentTypeResolver: Send + Sync {
    /// Content type id for a model
    fn content_type_param(&self, model_name: &str) -> String;
}

/// Uses the model name unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityContentType;

impl ContentTypeResolver for IdentityContentType {
    fn content_type_param(&self, model_name: &str) -> String {
        model_name.to_string()
    }
}

/// Static mapping with identity fallback for unmapped models
#[derive(Debug, Clone, Default)]
pub struct ContentTypeMap {
    mapping: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a model name to a content type id
    #[must_use]
    pub fn map(mut self, model_name: impl Into<String>, content_type: impl Into<String>) -> Self {
        self.mapping.insert(model_name.into(), content_type.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContentTypeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            mapping: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ContentTypeResolver for ContentTypeMap {
    fn content_type_param(&self, model_name: &str) -> String {
        self.mapping
            .get(model_name)
            .cloned()
            .unwrap_or_else(|| model_name.to_string())
    }
}

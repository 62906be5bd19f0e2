//! Model declarations
//!
//! A [`ModelSchema`] tells the serializer what a model's link fields point
//! at. Attributes need no declaration; every non-link field is copied.

use crate::types::ASSET_MODEL_NAME;
use std::collections::BTreeMap;

/// Cardinality of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    /// Single link
    BelongsTo,
    /// List of links
    HasMany,
}

/// Declared relationship of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipMeta {
    /// Cardinality
    pub kind: RelationshipKind,
    /// Related model name
    pub model_name: String,
}

/// A model name with its declared relationships
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    name: String,
    relationships: BTreeMap<String, RelationshipMeta>,
}

impl ModelSchema {
    /// Model without declared relationships
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relationships: BTreeMap::new(),
        }
    }

    /// The built-in asset model
    pub fn contentful_asset() -> Self {
        Self::new(ASSET_MODEL_NAME)
    }

    /// Declare a to-one relationship
    #[must_use]
    pub fn belongs_to(mut self, field: impl Into<String>, model_name: impl Into<String>) -> Self {
        self.relationships.insert(
            field.into(),
            RelationshipMeta {
                kind: RelationshipKind::BelongsTo,
                model_name: model_name.into(),
            },
        );
        self
    }

    /// Declare a to-many relationship
    #[must_use]
    pub fn has_many(mut self, field: impl Into<String>, model_name: impl Into<String>) -> Self {
        self.relationships.insert(
            field.into(),
            RelationshipMeta {
                kind: RelationshipKind::HasMany,
                model_name: model_name.into(),
            },
        );
        self
    }

    /// Model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared relationship for a field
    pub fn relationship(&self, field: &str) -> Option<&RelationshipMeta> {
        self.relationships.get(field)
    }
}

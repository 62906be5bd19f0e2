//! Serializer module
//!
//! Turns Contentful responses into JSON:API documents.
//!
//! # Overview
//!
//! ```text
//! { sys, fields }                      { id, type, attributes, relationships }
//! { sys, total, skip, limit,    ──▶    { data, included, meta }
//!   items, includes }
//! ```
//!
//! - Every non-link field becomes an attribute, alongside `contentType`,
//!   `createdAt` and `updatedAt` taken from `sys`.
//! - Link fields become relationships; asset links are typed
//!   `contentful-asset`.
//! - Records under `includes` are normalized into `included`.

mod model;
mod normalizer;
mod types;

pub use model::{ModelSchema, RelationshipKind, RelationshipMeta};
pub use normalizer::{
    extract_meta, model_name_from_payload_type, ContentfulSerializer, CONTENT_TYPE_ATTR,
    CREATED_AT_ATTR, UPDATED_AT_ATTR,
};
pub use types::{
    CollectionEnvelope, Document, FieldValue, Link, LinkMarker, LinkSys, Meta, PrimaryData,
    RawResource, Relationship, RelationshipData, ResourceIdentifier, ResourceObject, Sys,
};

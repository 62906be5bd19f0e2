//! Payload and document types
//!
//! Input side: Contentful's `sys`/`fields` envelopes. Output side: the
//! JSON:API document a store consumes.

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Contentful payloads
// ============================================================================

/// The only accepted value of a link's `sys.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkMarker {
    /// `"Link"`
    Link,
}

/// `sys` of a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    /// Always `Link`
    #[serde(rename = "type")]
    pub kind: LinkMarker,
    /// `Entry`, `Asset`, `ContentType`, `Space`, ...
    pub link_type: String,
    /// Id of the linked record
    pub id: String,
}

/// `{ "sys": { "type": "Link", "linkType": ..., "id": ... } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link metadata
    pub sys: LinkSys,
}

impl Link {
    /// Build a link
    pub fn new(link_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            sys: LinkSys {
                kind: LinkMarker::Link,
                link_type: link_type.into(),
                id: id.into(),
            },
        }
    }

    /// Whether this link points at an asset
    pub fn is_asset(&self) -> bool {
        self.sys.link_type == "Asset"
    }
}

/// A value under `fields`
///
/// Links are recognized by shape at deserialization time; anything that is
/// not a link (or a list of links) is kept as an opaque scalar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// To-one reference
    Link(Link),
    /// To-many reference (also matches an empty array)
    LinkList(Vec<Link>),
    /// Any other JSON value
    Scalar(JsonValue),
}

/// System metadata of a record or collection
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    /// Record id (absent on collections)
    #[serde(default)]
    pub id: Option<String>,
    /// `Entry`, `Asset`, `Array`, ...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Published revision
    #[serde(default)]
    pub revision: Option<u64>,
    /// Locale of the fields
    #[serde(default)]
    pub locale: Option<String>,
    /// Link to the entry's content type
    #[serde(default)]
    pub content_type: Option<Link>,
}

impl Sys {
    /// Whether this describes an asset
    pub fn is_asset(&self) -> bool {
        self.kind.as_deref() == Some("Asset")
    }

    /// Content type id of an entry
    pub fn content_type_id(&self) -> Option<&str> {
        self.content_type.as_ref().map(|link| link.sys.id.as_str())
    }
}

/// A single entry or asset
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawResource {
    /// System metadata
    pub sys: Sys,
    /// Field values keyed by field id
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

/// A page of entries or assets with linked records
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CollectionEnvelope {
    /// Collection metadata (`type: Array`)
    #[serde(default)]
    pub sys: Option<Sys>,
    /// Total number of matches
    #[serde(default)]
    pub total: Option<u64>,
    /// Offset of this page
    #[serde(default)]
    pub skip: Option<u64>,
    /// Page size
    #[serde(default)]
    pub limit: Option<u64>,
    /// Records on this page
    #[serde(default)]
    pub items: Vec<RawResource>,
    /// Linked records keyed by link type (`Asset`, `Entry`)
    #[serde(default)]
    pub includes: BTreeMap<String, Vec<RawResource>>,
}

// ============================================================================
// JSON:API documents
// ============================================================================

/// `(type, id)` reference to a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource id
    pub id: String,
    /// Model name
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResourceIdentifier {
    /// Create an identifier
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

/// Linkage of a relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-one
    One(ResourceIdentifier),
    /// To-many
    Many(Vec<ResourceIdentifier>),
}

/// `{ "data": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Linkage
    pub data: RelationshipData,
}

impl Relationship {
    /// To-one relationship
    pub fn one(identifier: ResourceIdentifier) -> Self {
        Self {
            data: RelationshipData::One(identifier),
        }
    }

    /// To-many relationship
    pub fn many(identifiers: Vec<ResourceIdentifier>) -> Self {
        Self {
            data: RelationshipData::Many(identifiers),
        }
    }
}

/// A normalized record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// Record id
    pub id: String,
    /// Model name
    #[serde(rename = "type")]
    pub kind: String,
    /// Field values plus `contentType`, `createdAt`, `updatedAt`
    pub attributes: JsonObject,
    /// Link fields
    pub relationships: BTreeMap<String, Relationship>,
}

impl ResourceObject {
    /// Attribute by name
    pub fn attribute(&self, name: &str) -> Option<&JsonValue> {
        self.attributes.get(name)
    }

    /// `createdAt` as a timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("createdAt")
    }

    /// `updatedAt` as a timestamp
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("updatedAt")
    }

    fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        self.attributes
            .get(name)
            .and_then(JsonValue::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Primary data of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// Collection responses
    Many(Vec<ResourceObject>),
    /// Single-record responses; `None` serializes as `null`
    One(Option<Box<ResourceObject>>),
}

/// Pagination metadata copied from a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Total number of matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Offset of the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl Meta {
    /// Meta with all three values
    pub fn new(total: u64, skip: u64, limit: u64) -> Self {
        Self {
            total: Some(total),
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    /// Whether no value is set
    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.skip.is_none() && self.limit.is_none()
    }
}

/// A normalized JSON:API document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Primary data
    pub data: PrimaryData,
    /// Linked records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
    /// Pagination metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Document {
    /// `{ "data": null }`
    pub fn null() -> Self {
        Self {
            data: PrimaryData::One(None),
            included: None,
            meta: None,
        }
    }

    /// Single primary record
    pub fn single(resource: Option<ResourceObject>, included: Vec<ResourceObject>) -> Self {
        Self {
            data: PrimaryData::One(resource.map(Box::new)),
            included: Some(included),
            meta: None,
        }
    }

    /// Collection of primary records
    pub fn many(
        resources: Vec<ResourceObject>,
        included: Vec<ResourceObject>,
        meta: Option<Meta>,
    ) -> Self {
        Self {
            data: PrimaryData::Many(resources),
            included: Some(included),
            meta,
        }
    }

    /// Primary record of a single-record document
    pub fn resource(&self) -> Option<&ResourceObject> {
        match &self.data {
            PrimaryData::One(resource) => resource.as_deref(),
            PrimaryData::Many(_) => None,
        }
    }

    /// Primary records of a collection document
    pub fn resources(&self) -> &[ResourceObject] {
        match &self.data {
            PrimaryData::Many(resources) => resources,
            PrimaryData::One(_) => &[],
        }
    }

    /// Linked records, empty when absent
    pub fn included(&self) -> &[ResourceObject] {
        self.included.as_deref().unwrap_or_default()
    }

    /// Serialize into a JSON value
    pub fn to_value(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}

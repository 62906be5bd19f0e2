//! Envelope to document normalization
//!
//! Every function here is pure: the same payload always yields the same
//! document, and nothing is remembered between calls.

use super::model::{ModelSchema, RelationshipKind};
use super::types::{
    CollectionEnvelope, Document, FieldValue, Link, Meta, RawResource, Relationship,
    ResourceIdentifier, ResourceObject, Sys,
};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, RequestType, ASSET_MODEL_ALIAS, ASSET_MODEL_NAME};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::trace;

/// Attribute holding the content type id (`"asset"` for assets)
pub const CONTENT_TYPE_ATTR: &str = "contentType";
/// Attribute holding `sys.createdAt`
pub const CREATED_AT_ATTR: &str = "createdAt";
/// Attribute holding `sys.updatedAt`
pub const UPDATED_AT_ATTR: &str = "updatedAt";

/// Model name for a record's `sys`
///
/// Assets always map to `contentful-asset`; entries use their content type
/// id, falling back to `fallback` when the payload carries none.
pub fn model_name_from_payload_type(sys: &Sys, fallback: &str) -> String {
    if sys.is_asset() {
        return ASSET_MODEL_NAME.to_string();
    }
    sys.content_type_id().unwrap_or(fallback).to_string()
}

/// Pagination metadata of a payload
///
/// `None` for a missing or null payload, or one that carries none of
/// `total`, `skip` and `limit`.
pub fn extract_meta(payload: Option<&JsonValue>) -> Option<Meta> {
    let object = payload?.as_object()?;
    let meta = Meta {
        total: object.get("total").and_then(JsonValue::as_u64),
        skip: object.get("skip").and_then(JsonValue::as_u64),
        limit: object.get("limit").and_then(JsonValue::as_u64),
    };
    (!meta.is_empty()).then_some(meta)
}

/// Converts Contentful payloads into JSON:API documents
///
/// Registered models supply relationship declarations, both for the model a
/// request was made for and for records found under `includes`.
#[derive(Debug, Clone, Default)]
pub struct ContentfulSerializer {
    models: BTreeMap<String, ModelSchema>,
}

impl ContentfulSerializer {
    /// Serializer with no registered models
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model
    #[must_use]
    pub fn with_model(mut self, schema: ModelSchema) -> Self {
        self.register(schema);
        self
    }

    /// Register a model
    pub fn register(&mut self, schema: ModelSchema) {
        self.models.insert(schema.name().to_string(), schema);
    }

    /// Registered schema for a model name, or a bare schema
    pub fn model_for(&self, model_name: &str) -> Cow<'_, ModelSchema> {
        match self.models.get(model_name) {
            Some(schema) => Cow::Borrowed(schema),
            None => Cow::Owned(ModelSchema::new(model_name)),
        }
    }

    // ========================================================================
    // Single records
    // ========================================================================

    /// Normalize one entry or asset
    ///
    /// A missing or null payload gives `{ "data": null }`.
    pub fn normalize(&self, model: &ModelSchema, payload: Option<&JsonValue>) -> Result<Document> {
        match non_null(payload) {
            None => Ok(Document::null()),
            Some(value) => {
                let raw: RawResource = serde_json::from_value(value.clone())?;
                let resource = self.normalize_resource(model, &raw)?;
                Ok(Document {
                    included: None,
                    ..Document::single(Some(resource), Vec::new())
                })
            }
        }
    }

    /// Normalize the response of a find-record request
    pub fn normalize_find_record_response(
        &self,
        model: &ModelSchema,
        payload: Option<&JsonValue>,
    ) -> Result<Document> {
        let document = self.normalize(model, payload)?;
        Ok(Document {
            included: Some(Vec::new()),
            ..document
        })
    }

    /// Normalize the response of a query-record request
    ///
    /// The first item becomes the primary record; no items gives
    /// `{ "data": null, "included": [] }`.
    pub fn normalize_query_record_response(
        &self,
        model: &ModelSchema,
        payload: Option<&JsonValue>,
    ) -> Result<Document> {
        let Some(envelope) = parse_collection(payload)? else {
            return Ok(Document::single(None, Vec::new()));
        };

        let primary = envelope
            .items
            .first()
            .map(|raw| self.normalize_resource(model, raw))
            .transpose()?;
        let included = match primary {
            Some(_) => self.normalize_includes(&envelope)?,
            None => Vec::new(),
        };

        Ok(Document::single(primary, included))
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// Normalize a collection response
    pub fn normalize_array_response(
        &self,
        model: &ModelSchema,
        payload: Option<&JsonValue>,
    ) -> Result<Document> {
        let meta = extract_meta(payload);
        let Some(envelope) = parse_collection(payload)? else {
            return Ok(Document::many(Vec::new(), Vec::new(), meta));
        };

        let resources = envelope
            .items
            .iter()
            .map(|raw| self.normalize_resource(model, raw))
            .collect::<Result<Vec<_>>>()?;
        let included = self.normalize_includes(&envelope)?;

        Ok(Document::many(resources, included, meta))
    }

    /// Normalize the response of a query request
    pub fn normalize_query_response(
        &self,
        model: &ModelSchema,
        payload: Option<&JsonValue>,
    ) -> Result<Document> {
        self.normalize_array_response(model, payload)
    }

    /// Normalize the response of a find-all request
    pub fn normalize_find_all_response(
        &self,
        model: &ModelSchema,
        payload: Option<&JsonValue>,
    ) -> Result<Document> {
        self.normalize_array_response(model, payload)
    }

    /// Normalize the response of a find-many request
    pub fn normalize_find_many_response(
        &self,
        model: &ModelSchema,
        payload: Option<&JsonValue>,
    ) -> Result<Document> {
        self.normalize_array_response(model, payload)
    }

    /// Normalize a payload according to the request that produced it
    pub fn normalize_response(
        &self,
        model: &ModelSchema,
        payload: Option<&JsonValue>,
        request_type: RequestType,
    ) -> Result<Document> {
        trace!(model = model.name(), ?request_type, "normalizing response");
        match request_type {
            RequestType::FindRecord => self.normalize_find_record_response(model, payload),
            RequestType::QueryRecord => self.normalize_query_record_response(model, payload),
            RequestType::FindMany => self.normalize_find_many_response(model, payload),
            RequestType::FindAll => self.normalize_find_all_response(model, payload),
            RequestType::Query => self.normalize_query_response(model, payload),
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Every record under `includes`, bucket by bucket
    fn normalize_includes(&self, envelope: &CollectionEnvelope) -> Result<Vec<ResourceObject>> {
        let mut included = Vec::new();
        for (link_type, records) in &envelope.includes {
            let fallback = bucket_model_name(link_type);
            for raw in records {
                let model_name = model_name_from_payload_type(&raw.sys, &fallback);
                let model = self.model_for(&model_name);
                included.push(self.normalize_resource(&model, raw)?);
            }
        }
        Ok(included)
    }

    fn normalize_resource(&self, model: &ModelSchema, raw: &RawResource) -> Result<ResourceObject> {
        let id = raw
            .sys
            .id
            .clone()
            .ok_or_else(|| Error::payload("record without `sys.id`"))?;
        let kind = model_name_from_payload_type(&raw.sys, model.name());

        let mut attributes = JsonObject::new();
        let mut relationships = BTreeMap::new();

        for (field, value) in &raw.fields {
            match value {
                FieldValue::Link(link) => {
                    let identifier = link_identifier(model, field, link);
                    relationships.insert(field.clone(), Relationship::one(identifier));
                }
                FieldValue::LinkList(links) if !links.is_empty() || is_has_many(model, field) => {
                    let identifiers = links
                        .iter()
                        .map(|link| link_identifier(model, field, link))
                        .collect();
                    relationships.insert(field.clone(), Relationship::many(identifiers));
                }
                FieldValue::LinkList(_) => {
                    attributes.insert(field.clone(), JsonValue::Array(Vec::new()));
                }
                FieldValue::Scalar(value) => {
                    attributes.insert(field.clone(), value.clone());
                }
            }
        }

        let content_type = if raw.sys.is_asset() {
            JsonValue::String(ASSET_MODEL_ALIAS.to_string())
        } else {
            optional_string(raw.sys.content_type_id())
        };
        attributes.insert(CONTENT_TYPE_ATTR.to_string(), content_type);
        attributes.insert(
            CREATED_AT_ATTR.to_string(),
            optional_string(raw.sys.created_at.as_deref()),
        );
        attributes.insert(
            UPDATED_AT_ATTR.to_string(),
            optional_string(raw.sys.updated_at.as_deref()),
        );

        Ok(ResourceObject {
            id,
            kind,
            attributes,
            relationships,
        })
    }
}

/// `(type, id)` for a link found in `field`
///
/// Asset links are always `contentful-asset`. Entry links use the declared
/// relationship type, or the field name when nothing is declared.
fn link_identifier(model: &ModelSchema, field: &str, link: &Link) -> ResourceIdentifier {
    let kind = if link.is_asset() {
        ASSET_MODEL_NAME.to_string()
    } else {
        model
            .relationship(field)
            .map_or_else(|| field.to_string(), |meta| meta.model_name.clone())
    };
    ResourceIdentifier::new(kind, link.sys.id.clone())
}

fn is_has_many(model: &ModelSchema, field: &str) -> bool {
    model
        .relationship(field)
        .is_some_and(|meta| meta.kind == RelationshipKind::HasMany)
}

/// Fallback model name for an `includes` bucket
fn bucket_model_name(link_type: &str) -> String {
    if link_type == "Asset" {
        ASSET_MODEL_NAME.to_string()
    } else {
        link_type.to_lowercase()
    }
}

fn optional_string(value: Option<&str>) -> JsonValue {
    value.map_or(JsonValue::Null, |s| JsonValue::String(s.to_string()))
}

fn non_null(payload: Option<&JsonValue>) -> Option<&JsonValue> {
    payload.filter(|value| !value.is_null())
}

fn parse_collection(payload: Option<&JsonValue>) -> Result<Option<CollectionEnvelope>> {
    match non_null(payload) {
        None => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

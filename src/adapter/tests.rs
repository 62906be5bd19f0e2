//! Tests for the adapter module

use super::*;
use crate::config::{ContentfulConfig, ResolvedConfig};
use crate::error::{Error, Result};
use crate::http::{RequestConfig, Transport};
use crate::types::QueryParams;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use test_case::test_case;

// ============================================================================
// Helpers
// ============================================================================

/// Records every request and answers with a fixed body
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<(String, RequestConfig)>>,
}

impl RecordingTransport {
    fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get_json(&self, url: &str, config: RequestConfig) -> Result<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), config));
        Ok(json!({"sys": {"type": "Array"}, "items": []}))
    }
}

fn config() -> ResolvedConfig {
    ContentfulConfig::new("space-1", "token-1").resolve().unwrap()
}

fn adapter() -> (ContentfulAdapter, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let adapter = ContentfulAdapter::with_transport(config(), transport.clone());
    (adapter, transport)
}

fn builder() -> RequestBuilder {
    RequestBuilder::default()
}

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Split a URL into its path and decoded query parameters
fn parse_url(raw: &str) -> (String, HashMap<String, String>) {
    let url = url::Url::parse(raw).unwrap();
    let query = url.query_pairs().into_owned().collect();
    (url.path().to_string(), query)
}

// ============================================================================
// Collection resolution
// ============================================================================

#[test_case("post", "entries/1" ; "entry model")]
#[test_case("asset", "assets/1" ; "asset alias")]
#[test_case("contentful-asset", "assets/1" ; "asset model")]
fn test_find_record_request(model: &str, expected_path: &str) {
    let builder = builder();
    let request = builder.find_record_request(model, "1");
    assert_eq!(request.path, expected_path);
    assert!(request.params.is_empty());
}

#[test_case("post", "entries")]
#[test_case("asset", "assets")]
#[test_case("contentful-asset", "assets")]
fn test_find_many_request(model: &str, expected_path: &str) {
    let builder = builder();
    let request = builder.find_many_request(model, &["1", "2", "3"]);
    assert_eq!(request.path, expected_path);
    assert_eq!(request.params, params(&[("sys.id[in]", "1,2,3")]));
}

#[test]
fn test_find_all_request_entries() {
    let builder = builder();
    let request = builder.find_all_request("post");
    assert_eq!(request.path, "entries");
    assert_eq!(request.params, params(&[("content_type", "post")]));
}

#[test_case("asset" ; "asset alias")]
#[test_case("contentful-asset" ; "asset model")]
fn test_find_all_request_assets(model: &str) {
    let builder = builder();
    let request = builder.find_all_request(model);
    assert_eq!(request.path, "assets");
    assert_eq!(request.params, params(&[("content_type", model)]));
}

#[test]
fn test_query_record_request_for_assets() {
    let builder = builder();
    let request = builder.query_record_request("contentful-asset", QueryParams::new());
    assert_eq!(request.path, "assets");
    assert_eq!(
        request.params,
        params(&[("content_type", "contentful-asset"), ("skip", "0"), ("limit", "1")])
    );
}

#[test]
fn test_find_record_request_encodes_id() {
    let request = builder().find_record_request("post", "a b/c?x=1");
    assert_eq!(request.path, "entries/a%20b%2Fc%3Fx%3D1");

    let (path, query) = parse_url(&request.url(&config()));
    assert_eq!(path, "/spaces/space-1/entries/a%20b%2Fc%3Fx%3D1/");
    assert!(query.is_empty());
}

// ============================================================================
// Query / queryRecord params
// ============================================================================

#[test]
fn test_query_request_injects_content_type() {
    let builder = builder();
    let request = builder.query_request("post", params(&[("fields.slug", "hello")]));
    assert_eq!(
        request.params,
        params(&[("fields.slug", "hello"), ("content_type", "post")])
    );
}

#[test]
fn test_query_request_overrides_caller_content_type() {
    let builder = builder();
    let request = builder.query_request("post", params(&[("content_type", "other")]));
    assert_eq!(request.params, params(&[("content_type", "post")]));
}

#[test]
fn test_query_record_request_with_empty_query() {
    let builder = builder();
    let request = builder.query_record_request("post", QueryParams::new());
    assert_eq!(
        request.params,
        params(&[("content_type", "post"), ("skip", "0"), ("limit", "1")])
    );
}

#[test]
fn test_query_record_request_merges_caller_params() {
    let builder = builder();
    let request = builder.query_record_request(
        "post",
        params(&[("order", "fields.title"), ("limit", "50"), ("skip", "10")]),
    );
    assert_eq!(
        request.params,
        params(&[
            ("content_type", "post"),
            ("order", "fields.title"),
            ("skip", "0"),
            ("limit", "1"),
        ])
    );
}

#[test]
fn test_content_type_mapping() {
    let (adapter, _) = adapter();
    let adapter = adapter.with_content_types(ContentTypeMap::new().map("blog-post", "blogPost"));

    assert_eq!(adapter.content_type_param("blog-post"), "blogPost");
    assert_eq!(adapter.content_type_param("author"), "author");

    let request = adapter.requests().find_all_request("blog-post");
    assert_eq!(request.params, params(&[("content_type", "blogPost")]));
}

#[test]
fn test_content_type_map_from_iter() {
    let map: ContentTypeMap = [("a", "b")].into_iter().collect();
    assert_eq!(map.content_type_param("a"), "b");
    assert_eq!(IdentityContentType.content_type_param("a"), "a");
}

#[test]
fn test_coalesce_find_requests() {
    let (adapter, _) = adapter();
    assert!(adapter.coalesce_find_requests());
}

// ============================================================================
// Query string serialization
// ============================================================================

#[test]
fn test_serialize_empty_params() {
    assert_eq!(serialize_query_params(&QueryParams::new()), "");
}

#[test]
fn test_serialize_single_param() {
    let query = serialize_query_params(&params(&[("content_type", "post")]));
    assert_eq!(query, "?content_type=post");
}

#[test]
fn test_serialize_encodes_keys_and_values() {
    let query = serialize_query_params(&params(&[("sys.id[in]", "a,b"), ("q", "x y&z")]));
    assert!(query.starts_with('?'));

    let mut pairs: Vec<&str> = query[1..].split('&').collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec!["q=x%20y%26z", "sys.id%5Bin%5D=a%2Cb"]);
}

#[test]
fn test_query_value_to_string() {
    assert_eq!(query_value_to_string(&json!("fields.title")), "fields.title");
    assert_eq!(query_value_to_string(&json!(1)), "1");
    assert_eq!(query_value_to_string(&json!(true)), "true");
    assert_eq!(query_value_to_string(&json!(["a", "b"])), "a,b");
    assert_eq!(query_value_to_string(&Value::Null), "");
}

#[test]
fn test_query_params_from_json() {
    let object = json!({"limit": 5, "order": "-sys.createdAt"});
    let query = query_params_from_json(object.as_object().unwrap());
    assert_eq!(query, params(&[("limit", "5"), ("order", "-sys.createdAt")]));
}

// ============================================================================
// URLs
// ============================================================================

#[test]
fn test_request_url_without_params() {
    let request = ContentRequest::new("entries/1");
    assert_eq!(
        request.url(&config()),
        "https://cdn.contentful.com/spaces/space-1/entries/1/"
    );
}

#[test]
fn test_request_url_with_environment_and_preview() {
    let config = ContentfulConfig::new("space-1", "token-1")
        .environment("staging")
        .preview_access_token("preview-1")
        .use_preview_api(true)
        .resolve()
        .unwrap();

    let request = ContentRequest::new("assets").param("sys.id[in]", "1,2");
    let (path, query) = parse_url(&request.url(&config));

    assert!(request
        .url(&config)
        .starts_with("https://preview.contentful.com/"));
    assert_eq!(path, "/spaces/space-1/environments/staging/assets/");
    assert_eq!(query.get("sys.id[in]").map(String::as_str), Some("1,2"));
}

// ============================================================================
// Operations through the transport
// ============================================================================

#[tokio::test]
async fn test_operations_send_bearer_token() {
    let (adapter, transport) = adapter();

    adapter.find_record("post", "1").await.unwrap();
    adapter.find_many("contentful-asset", &["2", "3"]).await.unwrap();
    adapter.find_all("post").await.unwrap();
    adapter
        .query("post", params(&[("fields.slug", "hello")]))
        .await
        .unwrap();
    adapter
        .query_record("post", params(&[("order", "fields.title")]))
        .await
        .unwrap();

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 5);
    for (_, config) in requests.iter() {
        assert_eq!(config.bearer_token.as_deref(), Some("token-1"));
    }
    drop(requests);

    let urls: Vec<(String, HashMap<String, String>)> =
        transport.urls().iter().map(|u| parse_url(u)).collect();

    assert_eq!(urls[0].0, "/spaces/space-1/entries/1/");
    assert!(urls[0].1.is_empty());

    assert_eq!(urls[1].0, "/spaces/space-1/assets/");
    assert_eq!(urls[1].1, params(&[("sys.id[in]", "2,3")]));

    assert_eq!(urls[2].1, params(&[("content_type", "post")]));

    assert_eq!(
        urls[3].1,
        params(&[("content_type", "post"), ("fields.slug", "hello")])
    );

    assert_eq!(
        urls[4].1,
        params(&[
            ("content_type", "post"),
            ("order", "fields.title"),
            ("limit", "1"),
            ("skip", "0"),
        ])
    );
}

#[test]
fn test_write_operations_are_unsupported() {
    let (adapter, transport) = adapter();
    let record = json!({"title": "new"});

    let create = tokio_test::block_on(adapter.create_record("post", &record));
    let update = tokio_test::block_on(adapter.update_record("post", &record));
    let delete = tokio_test::block_on(adapter.delete_record("post", "1"));

    for (result, name) in [
        (create, "createRecord"),
        (update, "updateRecord"),
        (delete, "deleteRecord"),
    ] {
        match result {
            Err(Error::Unsupported { operation }) => assert_eq!(operation, name),
            other => panic!("expected Unsupported for {name}, got {other:?}"),
        }
    }

    assert!(transport.urls().is_empty());
}

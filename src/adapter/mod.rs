//! Adapter module
//!
//! Builds Content Delivery API requests for the standard store operations:
//!
//! | Operation      | Path                   | Parameters                          |
//! |----------------|------------------------|-------------------------------------|
//! | `find_record`  | `{collection}/{id}/`   | none                                |
//! | `find_many`    | `{collection}/`        | `sys.id[in]`                        |
//! | `find_all`     | `{collection}/`        | `content_type`                      |
//! | `query`        | `{collection}/`        | caller query + `content_type`       |
//! | `query_record` | `{collection}/`        | as `query` + `limit=1`, `skip=0`    |
//!
//! `asset` and `contentful-asset` live in `assets`; every other model lives
//! in `entries`. Requests are built by [`RequestBuilder`], which needs no
//! transport. Write operations always fail with
//! [`Error::Unsupported`](crate::Error::Unsupported).

mod content_type;
mod contentful;
mod query;
mod request;

pub use content_type::{ContentTypeMap, ContentTypeResolver, IdentityContentType};
pub use contentful::ContentfulAdapter;
pub use query::{
    query_params_from_json, query_value_to_string, serialize_query_params, ContentRequest,
    CONTENT_TYPE, LIMIT, SKIP, SYS_ID_IN,
};
pub use request::RequestBuilder;

#[cfg(test)]
mod tests;

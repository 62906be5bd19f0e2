//! HTTP client module
//!
//! Provides the GET-only client the adapter sends requests through.
//!
//! # Features
//!
//! - **Bearer Authentication**: token attached per request
//! - **Status Classification**: non-2xx responses become errors carrying the body
//! - **Transport Trait**: lets the adapter run against a fake in tests

mod client;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, Transport, ACCEPT_JSON,
};

#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # contentful-delivery
//!
//! A read-only client for the Contentful Content Delivery API that
//! normalizes responses into JSON:API documents.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use contentful_delivery::{ContentfulClient, ContentfulConfig, Result};
//! use contentful_delivery::serializer::ModelSchema;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ContentfulConfig::new("space-id", "delivery-token").resolve()?;
//!     let client = ContentfulClient::new(config)?
//!         .with_model(ModelSchema::new("post").belongs_to("image", "contentful-asset"));
//!
//!     let posts = client.find_all("post").await?;
//!     for post in posts.resources() {
//!         println!("{} {:?}", post.id, post.attribute("title"));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      ContentfulClient                        │
//! │  find_record  find_many  find_all  query  query_record       │
//! └──────────────────────────────────────────────────────────────┘
//!                 │                              │
//!        ┌────────┴────────┐           ┌─────────┴─────────┐
//!        │     Adapter     │           │    Serializer     │
//!        ├─────────────────┤           ├───────────────────┤
//!        │ URL + params    │  payload  │ sys/fields →      │
//!        │ Bearer token    │ ────────▶ │ data/attributes/  │
//!        │ entries/assets  │           │ relationships/    │
//!        └────────┬────────┘           │ included/meta     │
//!                 │                    └───────────────────┘
//!        ┌────────┴────────┐
//!        │   HttpClient    │
//!        └─────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Configuration loading and resolution
pub mod config;

/// HTTP client
pub mod http;

/// Content Delivery API adapter
pub mod adapter;

/// Response normalization
pub mod serializer;

/// Adapter and serializer combined
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use adapter::ContentfulAdapter;
pub use client::ContentfulClient;
pub use config::{ContentfulConfig, RawConfig, ResolvedConfig};
pub use serializer::{ContentfulSerializer, Document, ModelSchema};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

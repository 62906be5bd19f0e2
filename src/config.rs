//! Configuration for the Content Delivery API
//!
//! Two shapes are accepted: the nested `contentful` object and the deprecated
//! flat `contentful*` keys. Both are resolved once, at construction time, into
//! a [`ResolvedConfig`] that the adapter carries for every request.
//!
//! ```yaml
//! contentful:
//!   space: abc123
//!   accessToken: delivery-token
//!   previewAccessToken: preview-token
//!   environment: staging
//!   usePreviewApi: false
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::types::Api;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

// ============================================================================
// Raw Config (as written by the user)
// ============================================================================

/// The nested `contentful` configuration object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentfulConfig {
    /// Content Delivery API token
    #[serde(default)]
    pub access_token: Option<String>,

    /// Content Preview API token
    #[serde(default)]
    pub preview_access_token: Option<String>,

    /// Space id
    #[serde(default)]
    pub space: Option<String>,

    /// Environment id (omitted from the URL when unset)
    #[serde(default)]
    pub environment: Option<String>,

    /// Read drafts through the Preview API
    #[serde(default)]
    pub use_preview_api: bool,

    /// Replaces `https://{cdn|preview}.contentful.com` (proxies, tests)
    #[serde(default)]
    pub host: Option<String>,
}

impl ContentfulConfig {
    /// Create a config for a space and delivery token
    pub fn new(space: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            space: Some(space.into()),
            access_token: Some(access_token.into()),
            ..Default::default()
        }
    }

    /// Set the preview token
    #[must_use]
    pub fn preview_access_token(mut self, token: impl Into<String>) -> Self {
        self.preview_access_token = Some(token.into());
        self
    }

    /// Set the environment
    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Toggle the Preview API
    #[must_use]
    pub fn use_preview_api(mut self, enabled: bool) -> Self {
        self.use_preview_api = enabled;
        self
    }

    /// Override the API host
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Resolve into the canonical config
    pub fn resolve(self) -> Result<ResolvedConfig> {
        RawConfig::from(self).resolve()
    }
}

/// Application configuration as loaded from a file
///
/// Mirrors an application's environment config: the nested `contentful`
/// object plus the legacy flat keys, which are still honored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    /// Nested configuration
    #[serde(default)]
    pub contentful: Option<ContentfulConfig>,

    /// Deprecated: use `contentful.accessToken`
    #[serde(default)]
    pub contentful_access_token: Option<String>,

    /// Deprecated: use `contentful.previewAccessToken`
    #[serde(default)]
    pub contentful_preview_access_token: Option<String>,

    /// Deprecated: use `contentful.space`
    #[serde(default)]
    pub contentful_space: Option<String>,

    /// Deprecated: use `contentful.usePreviewApi`
    #[serde(default)]
    pub contentful_use_preview_api: bool,
}

impl From<ContentfulConfig> for RawConfig {
    fn from(config: ContentfulConfig) -> Self {
        Self {
            contentful: Some(config),
            ..Default::default()
        }
    }
}

impl RawConfig {
    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Whether any deprecated flat key is set
    pub fn has_legacy_keys(&self) -> bool {
        self.contentful_access_token.is_some()
            || self.contentful_preview_access_token.is_some()
            || self.contentful_space.is_some()
            || self.contentful_use_preview_api
    }

    /// Resolve both config shapes into one canonical config
    ///
    /// Nested values win over legacy ones. Warnings are emitted here and
    /// nowhere else, so a client built once warns once.
    pub fn resolve(self) -> Result<ResolvedConfig> {
        let legacy = self.has_legacy_keys();
        let nested = self.contentful.unwrap_or_default();

        let access_token =
            non_empty(nested.access_token).or(non_empty(self.contentful_access_token));
        let preview_access_token = non_empty(nested.preview_access_token)
            .or(non_empty(self.contentful_preview_access_token));
        let space = non_empty(nested.space).or(non_empty(self.contentful_space));
        let use_preview_api = nested.use_preview_api || self.contentful_use_preview_api;

        let space = space.ok_or_else(|| Error::missing_field("contentful.space"))?;
        let mut access_token =
            access_token.ok_or_else(|| Error::missing_field("contentful.accessToken"))?;

        let mut api = Api::Cdn;
        if use_preview_api {
            match preview_access_token {
                Some(token) => {
                    access_token = token;
                    api = Api::Preview;
                }
                None => warn!(
                    "Preview API requested but no `previewAccessToken` is configured; \
                     falling back to the Content Delivery API"
                ),
            }
        }

        if legacy {
            warn!(
                "DEPRECATION: `contentfulAccessToken`, `contentfulSpace`, \
                 `contentfulPreviewAccessToken` and `contentfulUsePreviewApi` will be removed; \
                 migrate to the nested `contentful` object (space: '{space}')"
            );
        }

        let host = non_empty(nested.host);
        if let Some(host) = &host {
            url::Url::parse(host)?;
        }

        Ok(ResolvedConfig {
            access_token,
            api,
            space,
            environment: non_empty(nested.environment),
            host,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Resolved Config
// ============================================================================

/// Canonical configuration used for every request
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Token sent as `Authorization: Bearer ...`
    pub access_token: String,
    /// API host selected by the preview flag
    pub api: Api,
    /// Space id
    pub space: String,
    /// Environment id
    pub environment: Option<String>,
    /// Host override
    pub host: Option<String>,
}

impl ResolvedConfig {
    /// Scheme and host requests are sent to
    pub fn base_url(&self) -> String {
        match &self.host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => self.api.base_url(),
        }
    }

    /// `/environments/{env}`, or empty when no environment is set
    pub fn environment_path(&self) -> String {
        self.environment
            .as_deref()
            .map(|env| format!("/environments/{env}"))
            .unwrap_or_default()
    }

    /// `{base}/spaces/{space}{environment}`
    pub fn space_url(&self) -> String {
        format!(
            "{}/spaces/{}{}",
            self.base_url(),
            self.space,
            self.environment_path()
        )
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("access_token", &"***")
            .field("api", &self.api)
            .field("space", &self.space)
            .field("environment", &self.environment)
            .field("host", &self.host)
            .finish()
    }
}

//! CLI runner - executes commands

use crate::adapter::{query_params_from_json, ContentfulAdapter, RequestBuilder};
use crate::cli::commands::{Cli, Commands, OutputFormat, QueryArgs};
use crate::client::ContentfulClient;
use crate::config::{ContentfulConfig, RawConfig, ResolvedConfig};
use crate::error::{Error, Result};
use crate::serializer::Document;
use crate::types::QueryParams;
use serde_json::Value;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.resolve_config()?;
        debug!(?config, "resolved configuration");

        let operation = match &self.cli.command {
            Commands::Url { model, id, query } => {
                println!("{}", request_url(&config, model, id.as_deref(), query)?);
                return Ok(());
            }
            Commands::Find { model, id } => Operation::Find { model, id },
            Commands::FindMany { model, ids } => Operation::FindMany { model, ids },
            Commands::FindAll { model } => Operation::FindAll { model },
            Commands::Query { model, query } => Operation::Query {
                model,
                query: query_params(query)?,
            },
            Commands::QueryRecord { model, query } => Operation::QueryRecord {
                model,
                query: query_params(query)?,
            },
        };

        let value = if self.cli.raw {
            let adapter = ContentfulAdapter::new(config)?;
            operation.fetch_raw(&adapter).await?
        } else {
            let client = ContentfulClient::new(config)?;
            operation.fetch(&client).await?.to_value()?
        };

        self.output(&value)
    }

    /// Load the raw config and apply command-line overrides
    fn load_config(&self) -> Result<RawConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return RawConfig::from_json_str(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        if let Some(path) = &self.cli.config {
            return RawConfig::from_file(path);
        }

        Err(Error::config(
            "No configuration given (use -C <file> or --config-json)",
        ))
    }

    fn resolve_config(&self) -> Result<ResolvedConfig> {
        let mut raw = self.load_config()?;

        if self.cli.preview || self.cli.environment.is_some() {
            let mut nested = raw.contentful.take().unwrap_or_else(ContentfulConfig::default);
            if self.cli.preview {
                nested.use_preview_api = true;
            }
            if let Some(environment) = &self.cli.environment {
                nested.environment = Some(environment.clone());
            }
            raw.contentful = Some(nested);
        }

        raw.resolve()
    }

    fn output(&self, value: &Value) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

/// Merge `--query-json` and `--param` values; `--param` wins on conflicts
pub(crate) fn query_params(args: &QueryArgs) -> Result<QueryParams> {
    let mut params = match &args.query_json {
        Some(json) => {
            let value: Value = serde_json::from_str(json)
                .map_err(|e| Error::config(format!("Invalid query JSON: {e}")))?;
            let object = value
                .as_object()
                .ok_or_else(|| Error::config("Query JSON must be an object"))?;
            query_params_from_json(object)
        }
        None => QueryParams::new(),
    };

    for (key, value) in &args.params {
        params.insert(key.clone(), value.clone());
    }
    Ok(params)
}

/// Request URL for the `url` command
fn request_url(
    config: &ResolvedConfig,
    model: &str,
    id: Option<&str>,
    query: &QueryArgs,
) -> Result<String> {
    let requests = RequestBuilder::default();
    let request = match id {
        Some(id) => requests.find_record_request(model, id),
        None => requests.query_request(model, query_params(query)?),
    };
    Ok(request.url(config))
}

/// A fetching command with its parsed arguments
enum Operation<'a> {
    Find { model: &'a str, id: &'a str },
    FindMany { model: &'a str, ids: &'a [String] },
    FindAll { model: &'a str },
    Query { model: &'a str, query: QueryParams },
    QueryRecord { model: &'a str, query: QueryParams },
}

impl Operation<'_> {
    async fn fetch_raw(self, adapter: &ContentfulAdapter) -> Result<Value> {
        match self {
            Self::Find { model, id } => adapter.find_record(model, id).await,
            Self::FindMany { model, ids } => adapter.find_many(model, ids).await,
            Self::FindAll { model } => adapter.find_all(model).await,
            Self::Query { model, query } => adapter.query(model, query).await,
            Self::QueryRecord { model, query } => adapter.query_record(model, query).await,
        }
    }

    async fn fetch(self, client: &ContentfulClient) -> Result<Document> {
        match self {
            Self::Find { model, id } => client.find_record(model, id).await,
            Self::FindMany { model, ids } => client.find_many(model, ids).await,
            Self::FindAll { model } => client.find_all(model).await,
            Self::Query { model, query } => client.query(model, query).await,
            Self::QueryRecord { model, query } => client.query_record(model, query).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_query_params_merge() {
        let args = QueryArgs {
            params: vec![("limit".to_string(), "5".to_string())],
            query_json: Some(r#"{"limit": 10, "order": "sys.createdAt"}"#.to_string()),
        };
        let params = query_params(&args).unwrap();
        assert_eq!(params.get("limit").map(String::as_str), Some("5"));
        assert_eq!(params.get("order").map(String::as_str), Some("sys.createdAt"));
    }

    #[test]
    fn test_query_params_rejects_non_object() {
        let args = QueryArgs {
            params: Vec::new(),
            query_json: Some("[1, 2]".to_string()),
        };
        assert!(query_params(&args).is_err());
    }

    #[test]
    fn test_resolve_config_overrides() {
        let cli = Cli::parse_from([
            "contentful-delivery",
            "--config-json",
            r#"{"contentfulSpace": "s", "contentfulAccessToken": "t", "contentfulPreviewAccessToken": "p"}"#,
            "--preview",
            "-e",
            "staging",
            "find-all",
            "post",
        ]);
        let resolved = Runner::new(cli).resolve_config().unwrap();
        assert_eq!(resolved.access_token, "p");
        assert_eq!(resolved.environment.as_deref(), Some("staging"));
        assert_eq!(
            resolved.space_url(),
            "https://preview.contentful.com/spaces/s/environments/staging"
        );
    }

    #[test]
    fn test_request_url() {
        let cli = Cli::parse_from([
            "contentful-delivery",
            "--config-json",
            r#"{"contentful": {"space": "s", "accessToken": "t"}}"#,
            "url",
            "post",
            "--id",
            "42",
        ]);
        let config = Runner::new(cli).resolve_config().unwrap();
        let url = request_url(&config, "post", Some("42"), &QueryArgs::default()).unwrap();
        assert_eq!(url, "https://cdn.contentful.com/spaces/s/entries/42/");

        let query = QueryArgs {
            params: vec![("fields.slug".to_string(), "hello".to_string())],
            query_json: None,
        };
        let url = request_url(&config, "contentful-asset", None, &query).unwrap();
        let parsed = url::Url::parse(&url).unwrap();
        assert_eq!(parsed.path(), "/spaces/s/assets/");
        let pairs: std::collections::HashMap<String, String> =
            parsed.query_pairs().into_owned().collect();
        assert_eq!(pairs.get("content_type").map(String::as_str), Some("contentful-asset"));
        assert_eq!(pairs.get("fields.slug").map(String::as_str), Some("hello"));
    }

    #[test]
    fn test_missing_config() {
        let cli = Cli::parse_from(["contentful-delivery", "find-all", "post"]);
        let err = Runner::new(cli).resolve_config().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}

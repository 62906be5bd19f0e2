//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Contentful Content Delivery API command-line client
#[derive(Parser, Debug)]
#[command(name = "contentful-delivery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML, or JSON with a `.json` extension)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline config JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Read drafts through the Preview API
    #[arg(long, global = true)]
    pub preview: bool,

    /// Environment id (overrides the config file)
    #[arg(short, long, global = true)]
    pub environment: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Print the API payload instead of the normalized document
    #[arg(long, global = true)]
    pub raw: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single record by id
    Find {
        /// Model name (`contentful-asset` for assets)
        model: String,
        /// Record id
        id: String,
    },

    /// Fetch several records by id
    FindMany {
        /// Model name
        model: String,
        /// Record ids (comma-separated)
        #[arg(value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },

    /// Fetch every record of a model
    FindAll {
        /// Model name
        model: String,
    },

    /// Fetch records matching a query
    Query {
        /// Model name
        model: String,
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Fetch the first record matching a query
    QueryRecord {
        /// Model name
        model: String,
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Print the request URL for a query without sending it
    Url {
        /// Model name
        model: String,
        /// Record id (builds a find-record URL)
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        query: QueryArgs,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Find { .. } => "find",
            Self::FindMany { .. } => "find-many",
            Self::FindAll { .. } => "find-all",
            Self::Query { .. } => "query",
            Self::QueryRecord { .. } => "query-record",
            Self::Url { .. } => "url",
        }
    }
}

/// Query parameters given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Query parameter as `key=value` (repeatable)
    #[arg(short = 'q', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Query parameters as a JSON object
    #[arg(long)]
    pub query_json: Option<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse a `key=value` argument
fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{s}`"))?;
    if key.is_empty() {
        return Err(format!("invalid key=value: empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("fields.slug=hello=world").unwrap(),
            ("fields.slug".to_string(), "hello=world".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_parse_find_many() {
        let cli = Cli::parse_from(["contentful-delivery", "find-many", "post", "1,2,3"]);
        match cli.command {
            Commands::FindMany { model, ids } => {
                assert_eq!(model, "post");
                assert_eq!(ids, vec!["1", "2", "3"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_command_names() {
        let cases = [
            (vec!["find", "post", "1"], "find"),
            (vec!["find-many", "post", "1,2"], "find-many"),
            (vec!["find-all", "post"], "find-all"),
            (vec!["query", "post"], "query"),
            (vec!["query-record", "post"], "query-record"),
            (vec!["url", "post"], "url"),
        ];
        for (args, expected) in cases {
            let cli = Cli::parse_from(std::iter::once("contentful-delivery").chain(args));
            assert_eq!(cli.command.name(), expected);
        }
    }

    #[test]
    fn test_parse_query_record_with_params() {
        let cli = Cli::parse_from([
            "contentful-delivery",
            "query-record",
            "post",
            "-q",
            "order=fields.title",
            "--param",
            "fields.slug=hello",
            "--preview",
            "--format",
            "pretty",
        ]);
        assert!(cli.preview);
        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::QueryRecord { model, query } => {
                assert_eq!(model, "post");
                assert_eq!(query.params.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

//! CLI module
//!
//! Command-line interface for the Content Delivery API.
//!
//! # Commands
//!
//! - `find` - Fetch one record by id
//! - `find-many` - Fetch several records by id
//! - `find-all` - Fetch every record of a model
//! - `query` - Fetch records matching query parameters
//! - `query-record` - Fetch the first record matching query parameters
//! - `url` - Print a request URL without sending it

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, QueryArgs};
pub use runner::Runner;

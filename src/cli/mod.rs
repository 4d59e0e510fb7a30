//! CLI module
//!
//! Command-line interface for fetching paginated APIs.
//!
//! # Commands
//!
//! - `fetch` - Send a request and print the (merged) body
//! - `config` - Print the effective client configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, FetchArgs};
pub use runner::Runner;

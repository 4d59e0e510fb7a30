//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fetch paginated JSON APIs as a single document
#[derive(Parser, Debug)]
#[command(name = "paginated-http")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a request, following every `next` page of a GET
    Fetch(FetchArgs),

    /// Print the effective configuration
    Config,
}

/// Arguments of `fetch`
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Target URL
    pub url: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Extra request header as `Name: value` (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Inline JSON request body
    #[arg(short, long)]
    pub data: Option<String>,

    /// Page size to request when the URL has none
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Abort after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

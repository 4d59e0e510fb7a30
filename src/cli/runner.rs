//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FetchArgs};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{ReqwestTransport, Request, Transport};
use crate::pagination::PaginatingTransport;
use reqwest::Method;
use serde_json::Value;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

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
        match &self.cli.command {
            Commands::Fetch(args) => self.fetch(args).await,
            Commands::Config => self.show_config(),
        }
    }

    /// Load the client configuration, defaults when no file was given
    fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => {
                debug!(path = %path.display(), "Loading config");
                ClientConfig::from_file(path)
            }
            None => Ok(ClientConfig::default()),
        }
    }

    /// Configuration with command-line overrides applied
    fn effective_config(&self, args: &FetchArgs) -> Result<ClientConfig> {
        let mut config = self.load_config()?;
        if let Some(per_page) = args.per_page {
            config.pagination.page_size = per_page;
        }
        if let Some(max_pages) = args.max_pages {
            config.pagination.max_pages = Some(max_pages);
        }
        config.validate()?;
        Ok(config)
    }

    async fn fetch(&self, args: &FetchArgs) -> Result<()> {
        let config = self.effective_config(args)?;
        let request = build_request(args)?;

        let transport = PaginatingTransport::with_config(
            ReqwestTransport::with_config(&config.http)?,
            config.pagination,
        );

        let start = Instant::now();
        let response = transport.round_trip(request).await?;
        let status = response.status();
        let is_json = response.is_json();
        let body = response.bytes().await?;
        info!(
            status = status.as_u16(),
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetch finished"
        );

        let output = render_body(&body, is_json, args.pretty)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&output)?;
        if is_json {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;

        if !status.is_success() {
            return Err(Error::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        Ok(())
    }

    /// Print the effective configuration as YAML
    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;
        print!("{}", serde_yaml::to_string(&config)?);
        Ok(())
    }
}

/// Build the request described by `fetch` arguments
fn build_request(args: &FetchArgs) -> Result<Request> {
    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())
        .map_err(|e| Error::config(format!("Invalid HTTP method '{}': {e}", args.method)))?;

    let mut request = Request::parse(method, &args.url)?;
    for header in &args.headers {
        let (name, value) = parse_header(header)?;
        request = request.try_header(name, value)?;
    }
    if let Some(data) = &args.data {
        let body: Value = serde_json::from_str(data)
            .map_err(|e| Error::config(format!("Invalid --data JSON: {e}")))?;
        request = request.json(&body)?;
    }
    Ok(request)
}

/// Split a `Name: value` header argument
fn parse_header(raw: &str) -> Result<(&str, &str)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| Error::config(format!("Header must be 'Name: value', got '{raw}'")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::config(format!("Header name missing in '{raw}'")));
    }
    Ok((name, value.trim()))
}

/// Bytes to print for a response body
fn render_body(body: &[u8], is_json: bool, pretty: bool) -> Result<Vec<u8>> {
    if !(is_json && pretty) || body.is_empty() {
        return Ok(body.to_vec());
    }
    let value: Value = serde_json::from_slice(body)?;
    Ok(serde_json::to_vec_pretty(&value)?)
}

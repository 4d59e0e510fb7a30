//! Configuration types
//!
//! Pagination behaviour and the default HTTP transport are configured with
//! plain serde structs. Every field has a default, so an empty document is a
//! valid configuration. Files are read with `serde_yaml`, which also accepts
//! JSON.
//!
//! ```yaml
//! pagination:
//!   page_size_param: per_page
//!   page_size: 100
//!   max_pages: 50
//! http:
//!   timeout_secs: 10
//!   default_headers:
//!     Accept: application/vnd.github+json
//! ```

use crate::error::{Error, Result};
use crate::types::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_PARAM};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Pagination settings
    pub pagination: PaginationConfig,

    /// HTTP transport settings
    pub http: HttpClientConfig,
}

impl ClientConfig {
    /// Parse a YAML (or JSON) document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML (or JSON) file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Check all sections
    pub fn validate(&self) -> Result<()> {
        self.pagination.validate()?;
        self.http.validate()
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Settings for following `Link: rel="next"` chains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Query parameter carrying the page size hint
    pub page_size_param: String,

    /// Page size requested when the caller did not set one
    pub page_size: u32,

    /// Abort once this many pages were fetched and another `next` link
    /// shows up. `None` follows the chain until the server ends it.
    pub max_pages: Option<u32>,

    /// Abort when a `next` link points at a page already fetched
    pub detect_cycles: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size_param: DEFAULT_PAGE_SIZE_PARAM.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            detect_cycles: true,
        }
    }
}

impl PaginationConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size parameter name
    #[must_use]
    pub fn page_size_param(mut self, param: impl Into<String>) -> Self {
        self.page_size_param = param.into();
        self
    }

    /// Set the default page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set a ceiling on fetched pages
    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Enable or disable `next` cycle detection
    #[must_use]
    pub fn detect_cycles(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size_param.trim().is_empty() {
            return Err(Error::config("pagination.page_size_param must not be empty"));
        }
        if self.page_size == 0 {
            return Err(Error::config("pagination.page_size must be positive"));
        }
        if self.max_pages == Some(0) {
            return Err(Error::config("pagination.max_pages must be positive"));
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// Configuration for the reqwest-backed transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: Option<u64>,

    /// User agent string
    pub user_agent: String,

    /// Headers sent with every request
    pub default_headers: BTreeMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: None,
            user_agent: format!("paginated-http/{}", env!("CARGO_PKG_VERSION")),
            default_headers: BTreeMap::new(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout as a duration
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::config("http.timeout_secs must be positive"));
        }
        Ok(())
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Set the connect timeout in seconds
    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = Some(secs);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

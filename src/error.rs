//! Error types for paginated-http
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Every variant is fatal for the pagination sequence that raised it;
//! nothing is retried internally.

use thiserror::Error;

/// The main error type for paginated-http
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // URL Errors
    // ============================================================================
    #[error("Malformed URL '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    // ============================================================================
    // Page Processing Errors
    // ============================================================================
    #[error("Failed to decode JSON page from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected response type from {url}: expected a JSON array or object, got {found}")]
    UnexpectedShape { url: String, found: &'static str },

    #[error("Page shape changed at {url}: expected {expected}, got {found}")]
    ShapeMismatch {
        url: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unexpected content type '{content_type}' from {url} after pagination started")]
    UnexpectedContentType { url: String, content_type: String },

    #[error("Pagination cycle detected: {url} was already fetched")]
    PaginationCycle { url: String },

    #[error("Pagination exceeded the limit of {max_pages} pages")]
    PageLimitExceeded { max_pages: u32 },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Cancellation
    // ============================================================================
    #[error("Request cancelled")]
    Cancelled,

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a transport error for transports not backed by reqwest
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a malformed URL error
    pub fn malformed_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::MalformedUrl {
            url: url.into(),
            source,
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Whether the wrapped transport failed the round trip
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Transport { .. })
    }

    /// Whether a request or `next` URL could not be parsed
    pub fn is_malformed_url(&self) -> bool {
        matches!(self, Error::MalformedUrl { .. })
    }

    /// Whether a page could not be turned into mergeable data
    pub fn is_unexpected_shape(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedShape { .. } | Error::ShapeMismatch { .. }
        )
    }
}

/// Result type alias for paginated-http
pub type Result<T> = std::result::Result<T, Error>;

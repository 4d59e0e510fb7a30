// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::match_same_arms)]

//! # paginated-http
//!
//! Transparent `Link` header pagination for HTTP clients.
//!
//! A GET request that comes back as JSON with a `Link: <...>; rel="next"`
//! header is followed page by page, and every page is deep merged into one
//! document. The caller sees a single response, as if the server had
//! returned the whole collection at once.
//!
//! ## Features
//!
//! - **Transport decorator**: wraps any [`Transport`], so the pagination
//!   layer stacks with whatever client the caller already uses
//! - **Page size hint**: adds `per_page=100` unless the URL sets it
//! - **Deep merge**: arrays concatenate, objects merge recursively
//! - **Passthrough**: non-GET, non-JSON and single-page responses are
//!   returned untouched
//! - **Guards**: cycle detection, page limits, cancellation and timeouts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paginated_http::{PaginatingClient, ClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = PaginatingClient::from_config("https://api.github.com", &ClientConfig::default())?;
//!
//!     // Every page of the collection, merged
//!     let issues: Option<Vec<serde_json::Value>> =
//!         client.get("/repos/rust-lang/rust/issues").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │        PaginatingClient (base URL, JSON decode)      │
//! └──────────────────────────┬───────────────────────────┘
//!                            │
//! ┌──────────────────────────┴───────────────────────────┐
//! │     PaginatingTransport (follow next, accumulate)    │
//! ├──────────────┬──────────────┬──────────────┬─────────┤
//! │    query     │     link     │    merge     │  config │
//! │  per_page    │  RFC 8288    │  deep merge  │  YAML   │
//! └──────────────┴──────────────┴──────────────┴─────────┘
//!                            │
//! ┌──────────────────────────┴───────────────────────────┐
//! │          Transport (ReqwestTransport or any)         │
//! └──────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// Client and pagination configuration
pub mod config;

/// Request/response model and transports
pub mod http;

/// `Link` header parsing
pub mod link;

/// Page size query parameter handling
pub mod query;

/// Deep JSON merge
pub mod merge;

/// The pagination layer
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ClientConfig, HttpClientConfig, PaginationConfig};
pub use error::{Error, Result};
pub use http::{Body, ReqwestTransport, Request, Response, Transport};
pub use link::{Link, LinkSet};
pub use merge::merge;
pub use pagination::{PaginatingClient, PaginatingTransport};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

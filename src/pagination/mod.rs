//! Pagination module
//!
//! Transparent `Link` header pagination with JSON merging.
//!
//! # Overview
//!
//! [`PaginatingTransport`] wraps any [`crate::http::Transport`]. A GET
//! request gets a page size hint, then every `rel="next"` page is fetched
//! sequentially and folded into an [`Accumulator`] with the deep merge.
//! The result is one response whose body is the merged document.
//!
//! ```rust,ignore
//! use paginated_http::{PaginatingTransport, ReqwestTransport, Request, Transport};
//!
//! let transport = PaginatingTransport::new(ReqwestTransport::new()?);
//! let response = transport
//!     .round_trip(Request::get("https://api.github.com/repos/rust-lang/rust/issues")?)
//!     .await?;
//! let issues: Vec<serde_json::Value> = response.json().await?;
//! ```

mod client;
mod paginator;
mod types;

pub use client::PaginatingClient;
pub use paginator::PaginatingTransport;
pub use types::{Accumulator, PageShape};

//! HTTP module
//!
//! Request/response values and the transport seam the pagination layer
//! wraps.
//!
//! # Features
//!
//! - **Immutable requests**: retargeting goes through [`Request::with_url`]
//! - **Single-read bodies**: a [`Body`] is consumed by value when read
//! - **Pluggable transports**: anything implementing [`Transport`]
//! - **Default transport**: [`ReqwestTransport`] backed by `reqwest`

mod transport;
mod types;

pub use transport::{ReqwestTransport, Transport};
pub use types::{media_type, Body, Request, Response, ResponseParts};

//! The paginating transport decorator
//!
//! For a GET request whose JSON response carries a `Link` header, every
//! `rel="next"` page is fetched in order and merged into one document. The
//! caller receives a single response built from the last page's status and
//! headers with the merged document as its body.
//!
//! Everything else passes straight through: non-GET requests, non-JSON
//! responses and single JSON pages without a `Link` header are returned as
//! the inner transport produced them, body unread.

use super::types::Accumulator;
use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::http::{Body, Request, Response, ResponseParts, Transport};
use crate::link::LinkSet;
use crate::query::ensure_page_size;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_LENGTH, LINK, TRANSFER_ENCODING};
use reqwest::Method;
use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Transport decorator that follows `Link: rel="next"` pagination
///
/// Holds no per-request state, so one instance can serve concurrent
/// requests as long as the inner transport can.
#[derive(Debug, Clone)]
pub struct PaginatingTransport<T> {
    inner: T,
    config: PaginationConfig,
}

impl<T: Transport> PaginatingTransport<T> {
    /// Wrap a transport with default pagination settings
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, PaginationConfig::default())
    }

    /// Wrap a transport with custom pagination settings
    pub fn with_config(inner: T, config: PaginationConfig) -> Self {
        Self { inner, config }
    }

    /// The wrapped transport
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Run one logical request, aborting with [`Error::Cancelled`] as soon
    /// as `cancel` resolves
    ///
    /// The in-flight round trip and any partially merged pages are dropped.
    pub async fn round_trip_until<F>(&self, request: Request, cancel: F) -> Result<Response>
    where
        F: Future<Output = ()> + Send,
    {
        let url = request.url().clone();
        tokio::select! {
            biased;
            () = cancel => {
                warn!(%url, "Pagination cancelled");
                Err(Error::Cancelled)
            }
            result = self.paginate(request) => result,
        }
    }

    /// Run one logical request under a deadline covering every page
    pub async fn round_trip_with_timeout(
        &self,
        request: Request,
        timeout: Duration,
    ) -> Result<Response> {
        match tokio::time::timeout(timeout, self.paginate(request)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }

    async fn paginate(&self, request: Request) -> Result<Response> {
        if *request.method() != Method::GET {
            debug!(method = %request.method(), url = %request.url(), "Not a GET request, passing through");
            return self.inner.round_trip(request).await;
        }

        let first_url = ensure_page_size(
            request.url().clone(),
            &self.config.page_size_param,
            self.config.page_size,
        );
        let mut visited = HashSet::new();
        if self.config.detect_cycles {
            visited.insert(first_url.clone());
        }

        let mut current = request.with_url(first_url);
        let mut accumulator: Option<Accumulator> = None;

        loop {
            let response = self.inner.round_trip(current).await?;

            if !response.is_json() {
                if let Some(acc) = &accumulator {
                    let content_type = response.media_type().unwrap_or_default();
                    warn!(
                        url = %response.url(),
                        %content_type,
                        pages = acc.pages(),
                        "Non-JSON page after pagination started, aborting"
                    );
                    return Err(Error::UnexpectedContentType {
                        url: response.url().to_string(),
                        content_type,
                    });
                }
                debug!(url = %response.url(), "Non-JSON response, passing through");
                return Ok(response);
            }

            if accumulator.is_none() && !response.headers().contains_key(LINK) {
                debug!(url = %response.url(), "Single page response, passing through");
                return Ok(response);
            }

            let links = LinkSet::from_headers(response.headers());
            let (parts, body) = response.into_parts();
            let page = decode_page(&parts.url, body).await?;

            let acc = match accumulator.take() {
                Some(mut acc) => {
                    acc.absorb(page, parts.url.as_str())?;
                    acc
                }
                None => Accumulator::new(page, parts.url.as_str())?,
            };
            debug!(url = %parts.url, page = acc.pages(), shape = %acc.shape(), "Merged page");

            let Some(next) = links.next() else {
                info!(url = %request.url(), pages = acc.pages(), "Pagination complete");
                return finalize(parts, acc);
            };

            let next_url = parts
                .url
                .join(next.url())
                .map_err(|e| Error::malformed_url(next.url(), e))?;

            if let Some(max_pages) = self.config.max_pages {
                if acc.pages() >= max_pages {
                    warn!(url = %request.url(), max_pages, "Page limit reached, aborting");
                    return Err(Error::PageLimitExceeded { max_pages });
                }
            }
            if self.config.detect_cycles && !visited.insert(next_url.clone()) {
                warn!(url = %next_url, "Link cycle detected, aborting");
                return Err(Error::PaginationCycle {
                    url: next_url.to_string(),
                });
            }

            debug!(next = %next_url, "Following next link");
            current = request.with_url(next_url);
            accumulator = Some(acc);
        }
    }
}

#[async_trait]
impl<T: Transport> Transport for PaginatingTransport<T> {
    async fn round_trip(&self, request: Request) -> Result<Response> {
        self.paginate(request).await
    }
}

/// Read a page body completely and decode it
async fn decode_page(url: &Url, body: Body) -> Result<Value> {
    let bytes = body.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
        url: url.to_string(),
        source,
    })
}

/// Build the merged response from the last page's status line and headers
fn finalize(mut parts: ResponseParts, acc: Accumulator) -> Result<Response> {
    let body = serde_json::to_vec(&acc.into_value())?;
    parts.headers.remove(TRANSFER_ENCODING);
    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
    Ok(Response::from_parts(parts, Body::from(body)))
}

//! Transport trait and the reqwest-backed default
//!
//! A transport performs exactly one HTTP exchange per call. Retries,
//! redirects policy, authentication and rate limiting are the transport's
//! business, never the pagination layer's.

use super::types::{Request, Response};
use crate::config::HttpClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// One HTTP round trip
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the response, or a transport-level error
    async fn round_trip(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn round_trip(&self, request: Request) -> Result<Response> {
        (**self).round_trip(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn round_trip(&self, request: Request) -> Result<Response> {
        (**self).round_trip(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn round_trip(&self, request: Request) -> Result<Response> {
        (**self).round_trip(request).await
    }
}

/// Transport backed by a `reqwest::Client`
///
/// Response bodies are left streaming until the caller reads them.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: &HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .default_headers(build_headers(&config.default_headers)?);

        if let Some(connect_timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(connect_timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn round_trip(&self, request: Request) -> Result<Response> {
        let (method, url, headers, body) = request.into_parts();

        let mut req = self.client.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await?;
        debug!(
            %method,
            %url,
            status = response.status().as_u16(),
            "Request completed"
        );
        Ok(Response::from_reqwest(response))
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

/// Convert configured header strings into a header map
fn build_headers<'a>(
    headers: impl IntoIterator<Item = (&'a String, &'a String)>,
) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::config(format!("Invalid header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::config(format!("Invalid value for header '{key}': {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

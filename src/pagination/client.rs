//! REST client facade
//!
//! Resolves paths against a base URL, sends them through a
//! [`PaginatingTransport`] and decodes JSON answers, so a `get` of a
//! paginated collection yields every item at once.

use super::paginator::PaginatingTransport;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{ReqwestTransport, Request, Response, Transport};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// REST client whose GET requests are transparently paginated
#[derive(Debug, Clone)]
pub struct PaginatingClient<T = ReqwestTransport> {
    transport: PaginatingTransport<T>,
    base_url: Url,
}

impl PaginatingClient<ReqwestTransport> {
    /// Build a client with the reqwest transport
    pub fn from_config(base_url: &str, config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = PaginatingTransport::with_config(
            ReqwestTransport::with_config(&config.http)?,
            config.pagination.clone(),
        );
        Self::new(base_url, transport)
    }
}

impl<T: Transport> PaginatingClient<T> {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: &str, transport: PaginatingTransport<T>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::malformed_url(base_url, e))?;
        Ok(Self {
            transport,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &PaginatingTransport<T> {
        &self.transport
    }

    /// Build full URL from path; absolute URLs are used as is
    pub fn resolve(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(|e| Error::malformed_url(path, e));
        }

        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let full = format!("{base}/{path}");
        Url::parse(&full).map_err(|e| Error::malformed_url(full.clone(), e))
    }

    /// Send a request and return the raw (possibly merged) response
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response> {
        let mut request = Request::new(method, self.resolve(path)?);
        if let Some(body) = body {
            request = request.json(body)?;
        }
        self.transport.round_trip(request).await
    }

    /// Send a request and decode the JSON answer
    ///
    /// `204 No Content` yields `Ok(None)`; other non-success statuses fail
    /// with [`Error::HttpStatus`]. A body that cannot be read fails with the
    /// read error instead.
    pub async fn send_json<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<R>> {
        let response = self.request(method, path, body).await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            debug!(path, "No content");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await?;
            return Err(Error::http_status(status.as_u16(), body));
        }

        response.json().await.map(Some)
    }

    /// GET `path`, following every page
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>> {
        self.send_json(Method::GET, path, None).await
    }

    pub async fn post<R: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<Option<R>> {
        self.send_json(Method::POST, path, Some(body)).await
    }

    pub async fn put<R: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<Option<R>> {
        self.send_json(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<R: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<Option<R>> {
        self.send_json(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>> {
        self.send_json(Method::DELETE, path, None).await
    }
}

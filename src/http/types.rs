//! Request, response and body values

use crate::error::{Error, Result};
use crate::types::JSON_MEDIA_TYPE;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

// ============================================================================
// Request
// ============================================================================

/// An outgoing HTTP request
///
/// Requests are values: the pagination layer never mutates the caller's
/// request, it derives new ones with [`Request::with_url`].
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Request {
    /// Create a request without headers or body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Create a request from a URL string
    pub fn parse(method: Method, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| Error::malformed_url(url, e))?;
        Ok(Self::new(method, url))
    }

    /// Create a GET request from a URL string
    pub fn get(url: &str) -> Result<Self> {
        Self::parse(Method::GET, url)
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Add a header from strings, validating both parts
    pub fn try_header(self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::config(format!("Invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::config(format!("Invalid value for header '{name}': {e}")))?;
        Ok(self.header(name, value))
    }

    /// Set a raw body
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body and its content type
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let encoded = serde_json::to_vec(body)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
        self.body = Some(Bytes::from(encoded));
        Ok(self)
    }

    /// Copy of this request aimed at another URL
    ///
    /// Method, headers and body are preserved.
    #[must_use]
    pub fn with_url(&self, url: Url) -> Self {
        Self {
            method: self.method.clone(),
            url,
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Split into method, URL, headers and body
    pub fn into_parts(self) -> (Method, Url, HeaderMap, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

// ============================================================================
// Body
// ============================================================================

/// A response body that can be read exactly once
///
/// Either still streaming from the network or already in memory. Dropping
/// an unread body releases the underlying connection.
pub struct Body {
    inner: BodyInner,
}

enum BodyInner {
    Buffered(Bytes),
    Streaming(reqwest::Response),
}

impl Body {
    /// An empty, buffered body
    pub fn empty() -> Self {
        Self::from(Bytes::new())
    }

    pub(crate) fn streaming(response: reqwest::Response) -> Self {
        Self {
            inner: BodyInner::Streaming(response),
        }
    }

    /// Whether the body is already held in memory
    pub fn is_buffered(&self) -> bool {
        matches!(self.inner, BodyInner::Buffered(_))
    }

    /// Read the whole body
    pub async fn bytes(self) -> Result<Bytes> {
        match self.inner {
            BodyInner::Buffered(bytes) => Ok(bytes),
            BodyInner::Streaming(response) => Ok(response.bytes().await?),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self {
            inner: BodyInner::Buffered(bytes),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::from(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::from(Bytes::from_static(text.as_bytes()))
    }
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            BodyInner::Buffered(bytes) => f
                .debug_struct("Body")
                .field("buffered", &bytes.len())
                .finish(),
            BodyInner::Streaming(_) => f.debug_struct("Body").finish_non_exhaustive(),
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Status line, headers and URL of a response
#[derive(Debug, Clone)]
pub struct ResponseParts {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// URL the response was served from
    pub url: Url,
}

/// An HTTP response with a single-read body
#[derive(Debug)]
pub struct Response {
    parts: ResponseParts,
    body: Body,
}

impl Response {
    /// Assemble a response
    pub fn new(status: StatusCode, headers: HeaderMap, url: Url, body: impl Into<Body>) -> Self {
        Self {
            parts: ResponseParts {
                status,
                headers,
                url,
            },
            body: body.into(),
        }
    }

    /// Reassemble a response from its parts
    pub fn from_parts(parts: ResponseParts, body: Body) -> Self {
        Self { parts, body }
    }

    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        let parts = ResponseParts {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        };
        Self {
            parts,
            body: Body::streaming(response),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.parts.headers
    }

    pub fn url(&self) -> &Url {
        &self.parts.url
    }

    /// Value of the `Content-Length` header
    pub fn content_length(&self) -> Option<u64> {
        self.parts
            .headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }

    /// Media type of the body, lowercased and without parameters
    pub fn media_type(&self) -> Option<String> {
        media_type(&self.parts.headers)
    }

    /// Whether the body is declared as `application/json`
    pub fn is_json(&self) -> bool {
        self.media_type().as_deref() == Some(JSON_MEDIA_TYPE)
    }

    /// Split into parts and body
    pub fn into_parts(self) -> (ResponseParts, Body) {
        (self.parts, self.body)
    }

    /// Read the whole body
    pub async fn bytes(self) -> Result<Bytes> {
        self.body.bytes().await
    }

    /// Read the body as UTF-8 text (invalid sequences are replaced)
    pub async fn text(self) -> Result<String> {
        let bytes = self.body.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read and decode the body as JSON
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let (parts, body) = self.into_parts();
        let bytes = body.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
            url: parts.url.to_string(),
            source,
        })
    }
}

/// Parse the media type out of a `Content-Type` header
///
/// Returns `None` when the header is missing, not visible ASCII, or not of
/// the form `type/subtype`.
pub fn media_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let essence = value.split(';').next()?.trim();
    let (kind, subtype) = essence.split_once('/')?;
    if !is_token(kind) || !is_token(subtype) {
        return None;
    }
    Some(essence.to_ascii_lowercase())
}

/// RFC 7230 token
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

//! Page-size query normalization
//!
//! The first request of a pagination sequence asks the server for large
//! pages. A page size the caller already chose is never overwritten, and
//! `next` URLs are never touched since they carry the server's own choice.

use crate::error::{Error, Result};
use url::Url;

/// Parse `url` and make sure `param` is present in its query string
pub fn normalize_page_size(url: &str, param: &str, page_size: u32) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| Error::malformed_url(url, e))?;
    Ok(ensure_page_size(parsed, param, page_size))
}

/// Append `param=page_size` unless the query already has `param`
///
/// Existing parameters keep their order and encoding.
pub fn ensure_page_size(mut url: Url, param: &str, page_size: u32) -> Url {
    if has_query_param(&url, param) {
        return url;
    }
    url.query_pairs_mut()
        .append_pair(param, &page_size.to_string());
    url
}

/// Whether the decoded query of `url` contains `param`
pub fn has_query_param(url: &Url, param: &str) -> bool {
    url.query_pairs().any(|(key, _)| key == param)
}

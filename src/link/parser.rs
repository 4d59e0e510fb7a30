//! Link header parsing
//!
//! Format: `Link: <https://api.github.com/...?page=2>; rel="next", <...>; rel="last"`

use crate::types::NEXT_REL;
use reqwest::header::{HeaderMap, LINK};

/// A single link: target URL, relation type and any extra parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    url: String,
    rel: String,
    params: Vec<(String, String)>,
}

impl Link {
    /// Create a link without extra parameters
    pub fn new(url: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            rel: rel.into(),
            params: Vec::new(),
        }
    }

    /// Target URL as written in the header (may be relative)
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Relation type, e.g. `next`
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// Value of an extra parameter such as `title` or `type`
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Ordered set of links parsed from one response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<Link>,
}

impl LinkSet {
    /// Parse a raw `Link` header value
    pub fn parse(header: &str) -> Self {
        let links = split_unquoted(header, ',')
            .into_iter()
            .flat_map(parse_entry)
            .collect();
        Self { links }
    }

    /// Parse every `Link` header present in a header map
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let links = headers
            .get_all(LINK)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| Self::parse(value).links)
            .collect();
        Self { links }
    }

    /// All links whose relation equals `rel` (case-sensitive)
    pub fn filter_by_rel(&self, rel: &str) -> Vec<&Link> {
        self.links.iter().filter(|link| link.rel == rel).collect()
    }

    /// The first `next` link, if any
    pub fn next(&self) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == NEXT_REL)
    }

    /// Iterate links in header order
    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    /// Number of parsed links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no link parsed
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Parse one `<url>; k=v; ...` entry. A `rel` holding several space separated
/// relation types yields one link per type. Entries without a target or a
/// `rel` yield nothing.
fn parse_entry(entry: &str) -> Vec<Link> {
    let entry = entry.trim();
    let Some(rest) = entry.strip_prefix('<') else {
        return Vec::new();
    };
    let Some(end) = rest.find('>') else {
        return Vec::new();
    };
    let url = rest[..end].trim();
    if url.is_empty() {
        return Vec::new();
    }

    let mut rels = None;
    let mut params = Vec::new();
    for segment in split_unquoted(&rest[end + 1..], ';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (name, value) = match segment.split_once('=') {
            Some((name, value)) => (name.trim(), unquote(value.trim())),
            None => (segment, String::new()),
        };
        if name.eq_ignore_ascii_case("rel") {
            // Only the first occurrence counts (RFC 8288 section 3.3)
            if rels.is_none() {
                rels = Some(value);
            }
        } else {
            params.push((name.to_ascii_lowercase(), value));
        }
    }

    let Some(rels) = rels else {
        return Vec::new();
    };
    rels.split_whitespace()
        .map(|rel| Link {
            url: url.to_string(),
            rel: rel.to_string(),
            params: params.clone(),
        })
        .collect()
}

/// Split on `delimiter` outside of `<...>` targets and quoted strings
fn split_unquoted(input: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = input;
    loop {
        let (part, remainder) = next_part(rest, delimiter);
        parts.push(part);
        match remainder {
            Some(remainder) => rest = remainder,
            None => return parts,
        }
    }
}

/// First part of `input` and whatever follows its delimiter
///
/// A delimiter inside a closed `<...>` target or quoted string does not
/// split. When a target or string is left open, either by the end of input
/// or by a fresh `<` inside an open target, the part ends at the first
/// delimiter seen after it was opened.
fn next_part(input: &str, delimiter: char) -> (&str, Option<&str>) {
    let mut in_quotes = false;
    let mut in_target = false;
    let mut escaped = false;
    let mut fallback = None;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' if !in_target => in_quotes = !in_quotes,
            '<' if !in_quotes => {
                if let (true, Some(at)) = (in_target, fallback) {
                    return split_around(input, at, delimiter);
                }
                in_target = true;
            }
            '>' if !in_quotes => in_target = false,
            c if c == delimiter => {
                if !in_quotes && !in_target {
                    return split_around(input, i, delimiter);
                }
                fallback.get_or_insert(i);
            }
            _ => {}
        }
        if !in_quotes && !in_target {
            fallback = None;
        }
    }

    match fallback {
        Some(at) => split_around(input, at, delimiter),
        None => (input, None),
    }
}

fn split_around(input: &str, at: usize, delimiter: char) -> (&str, Option<&str>) {
    (&input[..at], Some(&input[at + delimiter.len_utf8()..]))
}

/// Strip surrounding quotes and resolve backslash escapes
fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.trim_matches('\'').to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

//! Tests for link header module

use super::*;
use reqwest::header::{HeaderMap, HeaderValue, LINK};

#[test]
fn test_parse_github_style_header() {
    let header = r#"<https://api.github.com/repositories/1/issues?page=2&per_page=100>; rel="next", <https://api.github.com/repositories/1/issues?page=5&per_page=100>; rel="last""#;
    let links = LinkSet::parse(header);

    assert_eq!(links.len(), 2);
    let next = links.next().unwrap();
    assert_eq!(
        next.url(),
        "https://api.github.com/repositories/1/issues?page=2&per_page=100"
    );
    assert_eq!(next.rel(), "next");

    let last = links.filter_by_rel("last");
    assert_eq!(last.len(), 1);
    assert!(last[0].url().contains("page=5"));
}

#[test]
fn test_parse_preserves_order() {
    let header = r#"<https://x.test/1>; rel="prev", <https://x.test/3>; rel="next", <https://x.test/1>; rel="first""#;
    let links = LinkSet::parse(header);
    let rels: Vec<&str> = links.iter().map(Link::rel).collect();
    assert_eq!(rels, vec!["prev", "next", "first"]);
}

#[test]
fn test_parse_unquoted_rel() {
    let links = LinkSet::parse("<https://x.test/2>; rel=next");
    assert_eq!(links.next().unwrap().url(), "https://x.test/2");
}

#[test]
fn test_parse_multiple_rel_values() {
    let links = LinkSet::parse(r#"<https://x.test/2>; rel="next last""#);
    assert_eq!(links.len(), 2);
    assert_eq!(links.next().unwrap().url(), "https://x.test/2");
    assert_eq!(links.filter_by_rel("last").len(), 1);
}

#[test]
fn test_parse_comma_inside_url_and_quotes() {
    let header = r#"<https://x.test/items?ids=1,2,3>; rel="next"; title="a, b", <https://x.test/0>; rel="prev""#;
    let links = LinkSet::parse(header);

    assert_eq!(links.len(), 2);
    let next = links.next().unwrap();
    assert_eq!(next.url(), "https://x.test/items?ids=1,2,3");
    assert_eq!(next.param("title"), Some("a, b"));
    assert_eq!(links.filter_by_rel("prev").len(), 1);
}

#[test]
fn test_parse_extra_params() {
    let links =
        LinkSet::parse(r#"<https://x.test/2>; Type="application/json"; rel="next"; hreflang=en"#);
    let next = links.next().unwrap();
    assert_eq!(next.param("type"), Some("application/json"));
    assert_eq!(next.param("hreflang"), Some("en"));
    assert_eq!(next.param("missing"), None);
}

#[test]
fn test_parse_escaped_quote() {
    let links = LinkSet::parse(r#"<https://x.test/2>; rel="next"; title="say \"hi\"""#);
    assert_eq!(links.next().unwrap().param("title"), Some(r#"say "hi""#));
}

#[test]
fn test_malformed_entries_are_dropped() {
    let header = r#"https://x.test/no-brackets; rel="prev", <https://x.test/no-rel>, <>; rel="first", <https://x.test/2>; rel="next""#;
    let links = LinkSet::parse(header);

    assert_eq!(links.len(), 1);
    assert_eq!(links.next().unwrap().url(), "https://x.test/2");
}

#[test]
fn test_unclosed_target_does_not_swallow_next_entry() {
    let header = r#"<https://a.test/1; rel="prev", <https://a.test/2>; rel="next""#;
    let links = LinkSet::parse(header);

    assert_eq!(links.len(), 1);
    assert_eq!(links.next().unwrap().url(), "https://a.test/2");
}

#[test]
fn test_unclosed_target_at_end_of_header() {
    let header = r#"<https://a.test/2>; rel="next", <https://a.test/9; rel="last""#;
    let links = LinkSet::parse(header);

    assert_eq!(links.len(), 1);
    assert_eq!(links.next().unwrap().url(), "https://a.test/2");
}

#[test]
fn test_unclosed_quote_does_not_swallow_next_entry() {
    let header = r#"<https://a.test/1>; title="unterminated, <https://a.test/2>; rel=next"#;
    let links = LinkSet::parse(header);

    assert_eq!(links.len(), 1);
    assert_eq!(links.next().unwrap().url(), "https://a.test/2");
}

#[test]
fn test_rel_match_is_case_sensitive() {
    let links = LinkSet::parse(r#"<https://x.test/2>; rel="Next""#);
    assert!(links.next().is_none());
    assert_eq!(links.filter_by_rel("Next").len(), 1);
}

#[test]
fn test_empty_and_garbage_headers() {
    assert!(LinkSet::parse("").is_empty());
    assert!(LinkSet::parse("   ").is_empty());
    assert!(LinkSet::parse(",,;;").is_empty());
    assert!(LinkSet::parse("not a link header").next().is_none());
}

#[test]
fn test_from_headers_missing() {
    let headers = HeaderMap::new();
    let links = LinkSet::from_headers(&headers);
    assert!(links.is_empty());
    assert!(links.next().is_none());
}

#[test]
fn test_from_headers_multiple_values() {
    let mut headers = HeaderMap::new();
    headers.append(
        LINK,
        HeaderValue::from_static(r#"<https://x.test/1>; rel="prev""#),
    );
    headers.append(
        LINK,
        HeaderValue::from_static(r#"<https://x.test/3>; rel="next""#),
    );

    let links = LinkSet::from_headers(&headers);
    assert_eq!(links.len(), 2);
    assert_eq!(links.next().unwrap().url(), "https://x.test/3");
}

#[test]
fn test_relative_target_kept_verbatim() {
    let links = LinkSet::parse(r#"</items?page=2>; rel="next""#);
    assert_eq!(links.next().unwrap().url(), "/items?page=2");
}

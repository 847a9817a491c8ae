//! Argument extraction.
//!
//! Turns an aligned match into typed wildcard values, and a query string
//! into a decoded parameter map.

use std::collections::HashMap;

use crate::routing::pattern::{RoutePattern, SegmentSpec, WildcardType};
use crate::routing::types::{RouteError, RouteResult, WildcardValue};
use crate::routing::uri::decode;

/// Build the wildcard map for segments already aligned by
/// [`align`](crate::routing::matcher::align).
///
/// Returns `None` if a segment cannot be coerced to its declared type,
/// which only happens when the segments were not aligned first.
pub fn extract_wildcards(pattern: &RoutePattern, aligned: &[String]) -> Option<HashMap<String, WildcardValue>> {
    let mut wildcards = HashMap::new();
    for (spec, segment) in pattern.segments.iter().zip(aligned) {
        if let SegmentSpec::TypedWildcard { name, ty } = spec {
            let value = match ty {
                WildcardType::Integer => WildcardValue::Integer(segment.parse().ok()?),
                WildcardType::String => WildcardValue::String(segment.clone()),
            };
            wildcards.insert(name.clone(), value);
        }
    }
    Some(wildcards)
}

/// Parse a query string (without the leading `?`).
///
/// Pairs are split on `&`, then on the first `=`; keys and values are
/// percent-decoded. A pair without `=` fails the whole parse. Empty pieces
/// are skipped and the first occurrence of a key wins.
pub fn parse_query_params(route: &str, query: Option<&str>) -> RouteResult<HashMap<String, String>> {
    let mut params = HashMap::new();
    let Some(query) = query else {
        return Ok(params);
    };

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(|| RouteError::MalformedQueryParam {
            route: route.to_string(),
            pair: pair.to_string(),
        })?;
        params.entry(decode(key)).or_insert_with(|| decode(value));
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_typed_values() {
        let pattern = RoutePattern::compile("app://h/laws/i:{lawId}/pdf/s:{file}").unwrap();
        let wildcards = extract_wildcards(&pattern, &segments(&["laws", "1981", "pdf", "a-b.pdf"])).unwrap();
        assert_eq!(wildcards.len(), 2);
        assert_eq!(wildcards["lawId"], WildcardValue::Integer(1981));
        assert_eq!(wildcards["file"], WildcardValue::String("a-b.pdf".into()));
    }

    #[test]
    fn test_extract_without_wildcards() {
        let pattern = RoutePattern::compile("app://h/webview").unwrap();
        let wildcards = extract_wildcards(&pattern, &segments(&["webview"])).unwrap();
        assert!(wildcards.is_empty());
    }

    #[test]
    fn test_query_params() {
        let params = parse_query_params("r", Some("order=desc&bn=false")).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["order"], "desc");
        assert_eq!(params["bn"], "false");
    }

    #[test]
    fn test_query_params_decoding() {
        let params = parse_query_params("r", Some("url=http%3A%2F%2Fwww.app.com%2Fanalysis&a%20b=x=y")).unwrap();
        assert_eq!(params["url"], "http://www.app.com/analysis");
        assert_eq!(params["a b"], "x=y");
    }

    #[test]
    fn test_query_params_edge_cases() {
        assert!(parse_query_params("r", None).unwrap().is_empty());
        assert!(parse_query_params("r", Some("")).unwrap().is_empty());

        let params = parse_query_params("r", Some("a=1&&a=2&empty=")).unwrap();
        assert_eq!(params["a"], "1");
        assert_eq!(params["empty"], "");
    }

    #[test]
    fn test_query_params_malformed() {
        let err = parse_query_params("app://h/x?page=1&broken", Some("page=1&broken")).unwrap_err();
        assert_eq!(
            err,
            RouteError::MalformedQueryParam {
                route: "app://h/x?page=1&broken".into(),
                pair: "broken".into(),
            }
        );
    }
}

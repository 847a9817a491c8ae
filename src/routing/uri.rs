//! URI splitting shared by the pattern compiler and the matcher.
//!
//! Both sides go through the same splitter, so a template and a route that
//! look alike always split alike. `url::Url` only validates the syntax:
//! scheme, host and path are taken from the input as written, so case is
//! preserved and `.`/`..` segments are kept as ordinary segments.

use percent_encoding::percent_decode_str;
use url::Url;

/// Scheme, host and decoded path segments of a URI-shaped string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriParts {
    pub scheme: String,
    /// Authority as written.
    pub host: String,
    /// Non-empty path segments, percent-decoded.
    pub segments: Vec<String>,
    pub has_query: bool,
    pub has_fragment: bool,
}

/// Split `input` into its URI parts.
///
/// Empty path segments (`a//b`, trailing `/`) are skipped.
pub fn split_uri(input: &str) -> Result<UriParts, String> {
    let url = Url::parse(input).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("URI has no hierarchical path".to_string());
    }

    let (scheme, rest) = input
        .split_once("://")
        .ok_or_else(|| "missing `://` authority marker".to_string())?;

    let (rest, has_fragment) = match rest.split_once('#') {
        Some((before, _)) => (before, true),
        None => (rest, false),
    };
    let (rest, has_query) = match rest.split_once('?') {
        Some((before, _)) => (before, true),
        None => (rest, false),
    };
    let (host, path) = match rest.find('/') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };

    if host.is_empty() {
        return Err("missing host".to_string());
    }

    let segments = path.split('/').filter(|s| !s.is_empty()).map(decode).collect();

    Ok(UriParts {
        scheme: scheme.to_string(),
        host: host.to_string(),
        segments,
        has_query,
        has_fragment,
    })
}

/// Percent-decode a single component.
pub fn decode(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}

//! Route matching logic.
//!
//! # Responsibilities
//! - Split the query string off a raw route
//! - Parse scheme, host and decoded path segments
//! - Match a parsed route against one compiled pattern
//!
//! # Design Decisions
//! - Scheme and host comparison is exact (case-sensitive)
//! - Literal segments are compared byte for byte
//! - A route may carry one extra trailing slug segment (`some-readable-title`)
//!   which is ignored by matching
//! - No regex: every check is a single pass over the segment

use crate::routing::pattern::{is_word_char, RoutePattern, SegmentSpec, WildcardType};
use crate::routing::uri::split_uri;

/// Trait for matching parsed routes against compiled conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the route matches this condition.
    fn matches(&self, route: &ParsedRoute) -> bool;
}

/// A route split into the parts matching works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoute {
    pub scheme: String,
    pub host: String,
    pub segments: Vec<String>,
}

impl ParsedRoute {
    /// Parse the query-free form of a route.
    ///
    /// Returns `None` when the string is not URI-shaped; such a route can
    /// never match a pattern.
    pub fn parse(clean_route: &str) -> Option<Self> {
        match split_uri(clean_route) {
            Ok(parts) => Some(Self {
                scheme: parts.scheme,
                host: parts.host,
                segments: parts.segments,
            }),
            Err(reason) => {
                tracing::debug!(route = %clean_route, %reason, "Route is not URI-shaped");
                None
            }
        }
    }
}

/// Split a raw route into its clean form and its query string (if any).
pub fn split_query(raw_route: &str) -> (&str, Option<&str>) {
    match raw_route.split_once('?') {
        Some((clean, query)) => (clean, Some(query)),
        None => (raw_route, None),
    }
}

/// Returns true for a human-readable slug: alphanumeric groups joined by
/// at least one hyphen.
pub fn is_slug(segment: &str) -> bool {
    let mut groups = 0;
    for group in segment.split('-') {
        if group.is_empty() || !group.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        groups += 1;
    }
    groups >= 2
}

/// Returns true when the whole segment is a non-negative integer.
pub fn is_integer_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) && segment.parse::<u64>().is_ok()
}

/// Returns true when the segment is accepted by a string wildcard.
pub fn is_string_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| is_word_char(c) || c == '.' || c == '-')
}

impl SegmentSpec {
    /// Returns true if the given route segment satisfies this spec.
    pub fn accepts(&self, given: &str) -> bool {
        match self {
            SegmentSpec::Literal(text) => text == given,
            SegmentSpec::TypedWildcard { ty: WildcardType::Integer, .. } => is_integer_segment(given),
            SegmentSpec::TypedWildcard { ty: WildcardType::String, .. } => is_string_segment(given),
        }
    }
}

/// Align the route's segments with the pattern's.
///
/// Returns the segments that take part in matching (the trailing slug, if
/// any, is dropped), or `None` when the pattern cannot match.
pub fn align<'a>(pattern: &RoutePattern, route: &'a ParsedRoute) -> Option<&'a [String]> {
    if pattern.scheme != route.scheme || pattern.host != route.host {
        return None;
    }

    let expected = pattern.segments.len();
    let given = route.segments.as_slice();
    let aligned = if given.len() == expected {
        given
    } else if given.len() == expected + 1 && is_slug(&given[expected]) {
        &given[..expected]
    } else {
        return None;
    };

    pattern
        .segments
        .iter()
        .zip(aligned)
        .all(|(spec, segment)| spec.accepts(segment))
        .then_some(aligned)
}

impl Matcher for RoutePattern {
    fn matches(&self, route: &ParsedRoute) -> bool {
        align(self, route).is_some()
    }
}

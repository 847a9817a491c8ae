//! Routing types and error definitions.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The category a route is registered under.
///
/// Resolution tries the categories in [`RouteKind::PRECEDENCE`] order, so a
/// `Direct` route always preempts a same-shaped `Composite` or `Action` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// A standalone presentable unit (a full screen).
    #[serde(alias = "activity")]
    Direct,
    /// A unit attached inside a container owned by the presenter.
    #[serde(alias = "fragment")]
    Composite,
    /// A generic action invoked with the resolved arguments.
    Action,
}

impl RouteKind {
    /// Fixed resolution order across the three tables.
    pub const PRECEDENCE: [RouteKind; 3] = [RouteKind::Direct, RouteKind::Composite, RouteKind::Action];

    /// Stable lowercase label, used for logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Direct => "direct",
            RouteKind::Composite => "composite",
            RouteKind::Action => "action",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed value bound to a wildcard (or passed as an extra argument).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WildcardValue {
    Integer(u64),
    String(String),
}

impl WildcardValue {
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            WildcardValue::Integer(v) => Some(*v),
            WildcardValue::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WildcardValue::Integer(_) => None,
            WildcardValue::String(s) => Some(s),
        }
    }
}

impl From<u64> for WildcardValue {
    fn from(v: u64) -> Self {
        WildcardValue::Integer(v)
    }
}

impl From<&str> for WildcardValue {
    fn from(v: &str) -> Self {
        WildcardValue::String(v.to_string())
    }
}

impl From<String> for WildcardValue {
    fn from(v: String) -> Self {
        WildcardValue::String(v)
    }
}

impl fmt::Display for WildcardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WildcardValue::Integer(v) => write!(f, "{}", v),
            WildcardValue::String(s) => f.write_str(s),
        }
    }
}

/// Result of a successful resolution.
///
/// Created fresh for every call and owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute<B> {
    /// The route exactly as given.
    pub raw_route: String,
    /// The route with its query string removed.
    pub clean_route: String,
    /// Pattern-key of the registration that matched.
    pub matched_pattern_key: String,
    /// Table the match came from.
    pub kind: RouteKind,
    /// Binding registered under the matched pattern.
    pub binding: B,
    /// One entry per wildcard declared in the matched pattern.
    pub wildcards: HashMap<String, WildcardValue>,
    /// Decoded query parameters; empty when the route has no query.
    pub query_params: HashMap<String, String>,
}

/// Errors raised while registering or resolving routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The pattern template cannot be compiled.
    #[error("Malformed pattern {pattern:?}: {reason}")]
    MalformedPattern { pattern: String, reason: String },

    /// The pattern-key is already registered in one of the tables.
    #[error("A route with the name {pattern:?} already exists as a {existing} route")]
    DuplicateRoute { pattern: String, existing: RouteKind },

    /// A query segment has no `=`.
    #[error("Malformed query parameter {pair:?} in route {route:?}")]
    MalformedQueryParam { route: String, pair: String },
}

impl RouteError {
    pub(crate) fn malformed(pattern: &str, reason: impl Into<String>) -> Self {
        RouteError::MalformedPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_deserialize_aliases() {
        #[derive(Deserialize)]
        struct Holder {
            kind: RouteKind,
        }

        let h: Holder = toml::from_str("kind = \"activity\"").unwrap();
        assert_eq!(h.kind, RouteKind::Direct);
        let h: Holder = toml::from_str("kind = \"fragment\"").unwrap();
        assert_eq!(h.kind, RouteKind::Composite);
        let h: Holder = toml::from_str("kind = \"action\"").unwrap();
        assert_eq!(h.kind, RouteKind::Action);
    }

    #[test]
    fn test_wildcard_value_serializes_untagged() {
        let json = serde_json::to_string(&WildcardValue::Integer(7)).unwrap();
        assert_eq!(json, "7");
        let json = serde_json::to_string(&WildcardValue::from("a.pdf")).unwrap();
        assert_eq!(json, "\"a.pdf\"");
    }

    #[test]
    fn test_error_display() {
        let err = RouteError::DuplicateRoute {
            pattern: "app://h/x".into(),
            existing: RouteKind::Composite,
        };
        assert!(err.to_string().contains("composite"));
        assert!(err.to_string().contains("app://h/x"));
    }
}

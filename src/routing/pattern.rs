//! Pattern compilation.
//!
//! # Responsibilities
//! - Split a template (`scheme://host/seg/...`) into scheme, host and segments
//! - Classify each segment as a literal or a typed wildcard
//! - Reject unbalanced or unknown wildcard markers
//!
//! # Design Decisions
//! - Compilation is pure: equal templates compile to equal patterns
//! - Wildcard syntax is `i:{name}` (integer) or `s:{name}` (string)
//! - Wildcard names are ASCII word characters, unique within a pattern

use std::collections::HashSet;
use std::fmt;

use crate::routing::types::{RouteError, RouteResult};
use crate::routing::uri::split_uri;

/// Declared type of a wildcard segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardType {
    /// `i:{name}`: a non-negative integer.
    Integer,
    /// `s:{name}`: word characters, dots, hyphens and underscores.
    String,
}

impl WildcardType {
    fn tag(&self) -> &'static str {
        match self {
            WildcardType::Integer => "i",
            WildcardType::String => "s",
        }
    }
}

/// One compiled path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentSpec {
    Literal(String),
    TypedWildcard { name: String, ty: WildcardType },
}

impl SegmentSpec {
    /// Classify a single (already decoded) template segment.
    pub fn parse(segment: &str) -> Result<Self, String> {
        if !segment.contains(['{', '}']) {
            return Ok(SegmentSpec::Literal(segment.to_string()));
        }

        let (ty, rest) = if let Some(rest) = segment.strip_prefix("i:") {
            (WildcardType::Integer, rest)
        } else if let Some(rest) = segment.strip_prefix("s:") {
            (WildcardType::String, rest)
        } else {
            return Err(format!("unrecognized wildcard marker in segment {:?}", segment));
        };

        let name = rest
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .ok_or_else(|| format!("unbalanced wildcard braces in segment {:?}", segment))?;

        if name.is_empty() || !name.chars().all(is_word_char) {
            return Err(format!("invalid wildcard name {:?}", name));
        }

        Ok(SegmentSpec::TypedWildcard {
            name: name.to_string(),
            ty,
        })
    }

    /// Wildcard name, if this segment is a wildcard.
    pub fn wildcard_name(&self) -> Option<&str> {
        match self {
            SegmentSpec::Literal(_) => None,
            SegmentSpec::TypedWildcard { name, .. } => Some(name),
        }
    }
}

impl fmt::Display for SegmentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentSpec::Literal(text) => f.write_str(text),
            SegmentSpec::TypedWildcard { name, ty } => write!(f, "{}:{{{}}}", ty.tag(), name),
        }
    }
}

/// Compiled form of a registration key. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePattern {
    pub scheme: String,
    pub host: String,
    pub segments: Vec<SegmentSpec>,
}

impl RoutePattern {
    /// Compile a pattern-key template.
    pub fn compile(template: &str) -> RouteResult<Self> {
        let parts = split_uri(template).map_err(|reason| RouteError::malformed(template, reason))?;

        if parts.has_query || parts.has_fragment {
            return Err(RouteError::malformed(
                template,
                "patterns cannot carry a query string or fragment",
            ));
        }

        let mut segments = Vec::with_capacity(parts.segments.len());
        let mut names = HashSet::new();
        for raw in &parts.segments {
            let spec = SegmentSpec::parse(raw).map_err(|reason| RouteError::malformed(template, reason))?;
            if let Some(name) = spec.wildcard_name() {
                if !names.insert(name.to_string()) {
                    return Err(RouteError::malformed(
                        template,
                        format!("wildcard {:?} declared twice", name),
                    ));
                }
            }
            segments.push(spec);
        }

        Ok(Self {
            scheme: parts.scheme,
            host: parts.host,
            segments,
        })
    }

    /// Names of the declared wildcards, in segment order.
    pub fn wildcard_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(SegmentSpec::wildcard_name)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

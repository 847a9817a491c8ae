//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every pattern so malformed templates fail at load time
//! - Detect duplicate pattern-keys across all kinds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::pattern::RoutePattern;
use crate::routing::types::RouteKind;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} ({pattern}) has an empty target")]
    EmptyTarget { index: usize, pattern: String },

    #[error("route #{index}: {reason}")]
    MalformedPattern { index: usize, reason: String },

    #[error("route #{index} ({pattern}) duplicates route #{first} ({kind})")]
    DuplicatePattern {
        index: usize,
        first: usize,
        pattern: String,
        kind: RouteKind,
    },

    #[error("fallback has an empty target")]
    EmptyFallbackTarget,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<&str, (usize, RouteKind)> = HashMap::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.target.trim().is_empty() {
            errors.push(ValidationError::EmptyTarget {
                index,
                pattern: route.pattern.clone(),
            });
        }

        if let Err(e) = RoutePattern::compile(&route.pattern) {
            errors.push(ValidationError::MalformedPattern {
                index,
                reason: e.to_string(),
            });
        }

        match seen.get(route.pattern.as_str()) {
            Some(&(first, kind)) => errors.push(ValidationError::DuplicatePattern {
                index,
                first,
                pattern: route.pattern.clone(),
                kind,
            }),
            None => {
                seen.insert(&route.pattern, (index, route.kind));
            }
        }
    }

    if let Some(fallback) = &config.fallback {
        if fallback.target.trim().is_empty() {
            errors.push(ValidationError::EmptyFallbackTarget);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

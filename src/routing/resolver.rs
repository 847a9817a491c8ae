//! Route resolution.
//!
//! # Responsibilities
//! - Strip and keep the query string
//! - Try the Direct, Composite and Action tables in that order
//! - Return the first structured match, or explicit no-match
//!
//! # Design Decisions
//! - Precedence across kinds is policy: identically shaped routes are
//!   disambiguated by their registration category
//! - The query string is only parsed once a pattern has matched
//! - Resolution never mutates the registry

use crate::observability::metrics;
use crate::routing::arguments::{extract_wildcards, parse_query_params};
use crate::routing::matcher::{align, split_query, ParsedRoute};
use crate::routing::registry::{RouteEntry, RouteRegistry};
use crate::routing::types::{ResolvedRoute, RouteKind, RouteResult};

/// A structural match inside one table.
#[derive(Debug)]
pub struct TableMatch<'r, 'a, B> {
    pub pattern_key: &'r str,
    pub entry: &'r RouteEntry<B>,
    /// Route segments aligned with the pattern (trailing slug dropped).
    pub aligned: &'a [String],
}

impl<B> RouteRegistry<B> {
    /// Find the first pattern of the `kind` table matching `route`.
    pub fn match_table<'r, 'a>(&'r self, kind: RouteKind, route: &'a ParsedRoute) -> Option<TableMatch<'r, 'a, B>> {
        self.entries(kind).find_map(|(pattern_key, entry)| {
            align(&entry.pattern, route).map(|aligned| TableMatch {
                pattern_key,
                entry,
                aligned,
            })
        })
    }
}

impl<B: Clone> RouteRegistry<B> {
    /// Resolve a raw route against the registered patterns.
    ///
    /// `Ok(None)` means nothing registered matches. A malformed query
    /// string on a matching route aborts with `MalformedQueryParam`.
    pub fn resolve(&self, raw_route: &str) -> RouteResult<Option<ResolvedRoute<B>>> {
        let (clean_route, query) = split_query(raw_route);
        let Some(parsed) = ParsedRoute::parse(clean_route) else {
            metrics::record_resolution(None);
            return Ok(None);
        };

        for kind in RouteKind::PRECEDENCE {
            let Some(found) = self.match_table(kind, &parsed) else {
                continue;
            };

            let Some(wildcards) = extract_wildcards(&found.entry.pattern, found.aligned) else {
                continue;
            };
            let query_params = parse_query_params(raw_route, query)?;

            tracing::debug!(
                route = %raw_route,
                pattern = %found.pattern_key,
                %kind,
                "Route resolved"
            );
            metrics::record_resolution(Some(kind));

            return Ok(Some(ResolvedRoute {
                raw_route: raw_route.to_string(),
                clean_route: clean_route.to_string(),
                matched_pattern_key: found.pattern_key.to_string(),
                kind,
                binding: found.entry.binding.clone(),
                wildcards,
                query_params,
            }));
        }

        tracing::debug!(route = %raw_route, "No route matched");
        metrics::record_resolution(None);
        Ok(None)
    }

    /// Returns true if `raw_route` resolves to a registered pattern.
    pub fn is_valid_route(&self, raw_route: &str) -> bool {
        matches!(self.resolve(raw_route), Ok(Some(_)))
    }
}

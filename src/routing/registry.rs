//! Route registration.
//!
//! # Responsibilities
//! - Hold one table per [`RouteKind`], keyed by pattern-key
//! - Compile each pattern-key once, at registration time
//! - Reject a pattern-key already claimed by any table
//!
//! # Design Decisions
//! - Uniqueness is global across kinds, so a mis-classified route fails
//!   loudly instead of shadowing another one
//! - Tables are unordered maps; patterns within one table are assumed not
//!   to overlap, so iteration order never decides a match
//! - No internal locking: register everything before resolving

use std::collections::HashMap;

use crate::observability::metrics;
use crate::routing::pattern::RoutePattern;
use crate::routing::types::{RouteError, RouteKind, RouteResult};

/// A registered binding plus its compiled pattern.
#[derive(Debug, Clone)]
pub struct RouteEntry<B> {
    pub pattern: RoutePattern,
    pub binding: B,
}

/// Three independent pattern tables.
#[derive(Debug, Clone)]
pub struct RouteRegistry<B> {
    direct: HashMap<String, RouteEntry<B>>,
    composite: HashMap<String, RouteEntry<B>>,
    action: HashMap<String, RouteEntry<B>>,
}

impl<B> Default for RouteRegistry<B> {
    fn default() -> Self {
        Self {
            direct: HashMap::new(),
            composite: HashMap::new(),
            action: HashMap::new(),
        }
    }
}

impl<B> RouteRegistry<B> {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, kind: RouteKind) -> &HashMap<String, RouteEntry<B>> {
        match kind {
            RouteKind::Direct => &self.direct,
            RouteKind::Composite => &self.composite,
            RouteKind::Action => &self.action,
        }
    }

    fn table_mut(&mut self, kind: RouteKind) -> &mut HashMap<String, RouteEntry<B>> {
        match kind {
            RouteKind::Direct => &mut self.direct,
            RouteKind::Composite => &mut self.composite,
            RouteKind::Action => &mut self.action,
        }
    }

    /// Register `binding` under `pattern_key` in the `kind` table.
    ///
    /// Fails with `MalformedPattern` if the key cannot be compiled and with
    /// `DuplicateRoute` if any table already holds the key. A failed call
    /// leaves the registry untouched.
    pub fn register(&mut self, kind: RouteKind, pattern_key: impl Into<String>, binding: B) -> RouteResult<()> {
        let pattern_key = pattern_key.into();

        if let Some(existing) = self.kind_of(&pattern_key) {
            tracing::warn!(pattern = %pattern_key, %kind, %existing, "Duplicate route registration");
            metrics::record_registration(kind, "duplicate");
            return Err(RouteError::DuplicateRoute {
                pattern: pattern_key,
                existing,
            });
        }

        let pattern = RoutePattern::compile(&pattern_key).inspect_err(|e| {
            tracing::warn!(pattern = %pattern_key, %kind, error = %e, "Rejected route pattern");
            metrics::record_registration(kind, "malformed");
        })?;

        tracing::debug!(pattern = %pattern_key, %kind, "Route registered");
        metrics::record_registration(kind, "ok");
        self.table_mut(kind).insert(pattern_key, RouteEntry { pattern, binding });
        Ok(())
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with_route(mut self, kind: RouteKind, pattern_key: impl Into<String>, binding: B) -> RouteResult<Self> {
        self.register(kind, pattern_key, binding)?;
        Ok(self)
    }

    /// Which table, if any, holds `pattern_key`.
    pub fn kind_of(&self, pattern_key: &str) -> Option<RouteKind> {
        RouteKind::PRECEDENCE
            .into_iter()
            .find(|kind| self.table(*kind).contains_key(pattern_key))
    }

    pub fn contains(&self, pattern_key: &str) -> bool {
        self.kind_of(pattern_key).is_some()
    }

    /// Iterate over the entries of one table, in unspecified order.
    pub fn entries(&self, kind: RouteKind) -> impl Iterator<Item = (&str, &RouteEntry<B>)> {
        self.table(kind).iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of registered routes.
    pub fn len(&self) -> usize {
        self.direct.len() + self.composite.len() + self.action.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all three tables.
    pub fn reset(&mut self) {
        self.direct.clear();
        self.composite.clear();
        self.action.clear();
        tracing::debug!("Route registry reset");
    }
}

//! Top-level dispatch.
//!
//! # Responsibilities
//! - Resolve a route, or fall back to the configured fallback binding
//! - Suppress re-dispatch of the route that is already current
//! - Merge caller arguments over wildcard values
//! - Hand the result to the presenter
//!
//! # State
//! ```text
//! current_route: None → Some(route) → Some(other route) → ... → None (reset)
//! ```
//!
//! # Design Decisions
//! - The current route is owned by the dispatcher, not a global
//! - Extra arguments win over wildcards with the same name
//! - Presenter outcome is never inspected

use std::collections::HashMap;
use std::sync::Arc;

use crate::dispatch::flags::{DispatchFlag, DispatchFlags};
use crate::dispatch::presenter::{Presentation, Presenter};
use crate::dispatch::types::{DispatchError, DispatchOutcome, DispatchResult, Fallback};
use crate::observability::metrics;
use crate::routing::arguments::parse_query_params;
use crate::routing::matcher::split_query;
use crate::routing::registry::RouteRegistry;
use crate::routing::types::{ResolvedRoute, RouteKind, RouteResult, WildcardValue};

/// Resolves routes and drives the presenter.
pub struct Dispatcher<B> {
    registry: RouteRegistry<B>,
    presenter: Option<Arc<dyn Presenter<B>>>,
    fallback: Option<Fallback<B>>,
    current_route: Option<String>,
}

impl<B> Default for Dispatcher<B> {
    fn default() -> Self {
        Self::new(RouteRegistry::new())
    }
}

impl<B> Dispatcher<B> {
    /// Create a dispatcher over an already populated registry.
    pub fn new(registry: RouteRegistry<B>) -> Self {
        Self {
            registry,
            presenter: None,
            fallback: None,
            current_route: None,
        }
    }

    pub fn with_presenter(mut self, presenter: impl Presenter<B> + 'static) -> Self {
        self.set_presenter(presenter);
        self
    }

    pub fn set_presenter(&mut self, presenter: impl Presenter<B> + 'static) {
        self.presenter = Some(Arc::new(presenter));
    }

    pub fn set_fallback(&mut self, kind: RouteKind, binding: B) {
        self.fallback = Some(Fallback { kind, binding });
    }

    pub fn clear_fallback(&mut self) {
        self.fallback = None;
    }

    pub fn fallback(&self) -> Option<&Fallback<B>> {
        self.fallback.as_ref()
    }

    pub fn registry(&self) -> &RouteRegistry<B> {
        &self.registry
    }

    /// Register a route on the underlying registry.
    pub fn register(&mut self, kind: RouteKind, pattern_key: impl Into<String>, binding: B) -> RouteResult<()> {
        self.registry.register(kind, pattern_key, binding)
    }

    /// The route most recently handed to the presenter.
    pub fn current_route(&self) -> Option<&str> {
        self.current_route.as_deref()
    }

    /// Clear every table and the current route.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.current_route = None;
    }

    /// Swap in a freshly built registry (a reconfiguration cycle).
    ///
    /// The current route is cleared, since it may no longer resolve.
    pub fn replace_registry(&mut self, registry: RouteRegistry<B>) -> RouteRegistry<B> {
        self.current_route = None;
        tracing::info!(routes = registry.len(), "Route table replaced");
        std::mem::replace(&mut self.registry, registry)
    }
}

impl<B: Clone> Dispatcher<B> {
    pub fn resolve(&self, raw_route: &str) -> RouteResult<Option<ResolvedRoute<B>>> {
        self.registry.resolve(raw_route)
    }

    pub fn is_valid_route(&self, raw_route: &str) -> bool {
        self.registry.is_valid_route(raw_route)
    }

    /// Resolve `raw_route` and present it.
    ///
    /// Dispatching the current route again is a silent no-op unless `flags`
    /// contains [`DispatchFlag::OverrideSameRoute`].
    pub fn dispatch(
        &mut self,
        raw_route: &str,
        extra_args: HashMap<String, String>,
        flags: &DispatchFlags,
    ) -> DispatchResult<DispatchOutcome> {
        tracing::debug!(route = %raw_route, %flags, "Dispatching route");

        let resolved = self.resolve(raw_route).inspect_err(|e| {
            tracing::warn!(route = %raw_route, error = %e, "Route resolution failed");
            metrics::record_dispatch("resolution_error");
        })?;

        let (kind, binding, wildcards, query_params, is_fallback) = match resolved {
            Some(route) => (route.kind, route.binding, route.wildcards, route.query_params, false),
            None => match &self.fallback {
                Some(fallback) => {
                    let (_, query) = split_query(raw_route);
                    let query_params = parse_query_params(raw_route, query)?;
                    (fallback.kind, fallback.binding.clone(), HashMap::new(), query_params, true)
                }
                None => {
                    tracing::warn!(route = %raw_route, "Route not found");
                    metrics::record_dispatch("not_found");
                    return Err(DispatchError::RouteNotFound(raw_route.to_string()));
                }
            },
        };

        if self.current_route.as_deref() == Some(raw_route) && !flags.contains(DispatchFlag::OverrideSameRoute) {
            tracing::debug!(route = %raw_route, "Route already current, skipping");
            metrics::record_dispatch("suppressed");
            return Ok(DispatchOutcome::SuppressedSameRoute);
        }

        let presenter = self.presenter.clone().ok_or_else(|| {
            tracing::error!(route = %raw_route, "Dispatch attempted without a presenter");
            metrics::record_dispatch("presenter_unavailable");
            DispatchError::PresenterUnavailable
        })?;

        self.current_route = Some(raw_route.to_string());

        let mut arguments = wildcards;
        arguments.extend(extra_args.into_iter().map(|(k, v)| (k, WildcardValue::String(v))));

        tracing::info!(route = %raw_route, %kind, fallback = is_fallback, "Route dispatched");
        presenter.present(&Presentation {
            route: raw_route,
            kind,
            binding: &binding,
            arguments: &arguments,
            query_params: &query_params,
            flags,
        });

        if is_fallback {
            metrics::record_dispatch("fallback");
            Ok(DispatchOutcome::PresentedFallback(kind))
        } else {
            metrics::record_dispatch("presented");
            Ok(DispatchOutcome::Presented(kind))
        }
    }
}

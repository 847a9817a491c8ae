//! Presenter collaborator interface.
//!
//! The presenter turns a resolved route into an observable effect: showing
//! a screen, attaching a unit to a container, or running an action. The
//! dispatcher calls it synchronously and never inspects the outcome.

use std::collections::HashMap;
use std::fmt;

use crate::dispatch::flags::DispatchFlags;
use crate::routing::types::{RouteKind, WildcardValue};

/// Everything a presenter receives for one dispatch.
#[derive(Debug)]
pub struct Presentation<'a, B> {
    /// The route that triggered the dispatch, as given.
    pub route: &'a str,
    pub kind: RouteKind,
    pub binding: &'a B,
    /// Wildcard values merged with caller-supplied extra arguments.
    pub arguments: &'a HashMap<String, WildcardValue>,
    pub query_params: &'a HashMap<String, String>,
    pub flags: &'a DispatchFlags,
}

/// External capability invoked with each resolved dispatch.
///
/// For `Action` bindings the presenter simply runs the action with the
/// arguments. For `Direct` and `Composite` bindings it performs whatever
/// attach, replace or navigate behaviour its platform needs.
pub trait Presenter<B>: Send + Sync {
    fn present(&self, presentation: &Presentation<'_, B>);
}

impl<B, F> Presenter<B> for F
where
    F: Fn(&Presentation<'_, B>) + Send + Sync,
{
    fn present(&self, presentation: &Presentation<'_, B>) {
        self(presentation)
    }
}

/// Presenter that only logs what it would present.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresenter;

impl<B: fmt::Display> Presenter<B> for TracingPresenter {
    fn present(&self, presentation: &Presentation<'_, B>) {
        let mut arguments: Vec<String> = presentation
            .arguments
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        arguments.sort();

        match presentation.kind {
            RouteKind::Action => tracing::info!(
                route = %presentation.route,
                action = %presentation.binding,
                arguments = ?arguments,
                "Executing router action"
            ),
            kind => tracing::info!(
                route = %presentation.route,
                %kind,
                target = %presentation.binding,
                arguments = ?arguments,
                query = ?presentation.query_params,
                flags = %presentation.flags,
                "Presenting route target"
            ),
        }
    }
}

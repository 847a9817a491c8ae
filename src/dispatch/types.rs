//! Dispatch types and error definitions.

use thiserror::Error;

use crate::routing::types::{RouteError, RouteKind};

/// Binding used when a dispatched route matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback<B> {
    pub kind: RouteKind,
    pub binding: B,
}

/// What a successful `dispatch` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The presenter was invoked for a match of this kind.
    Presented(RouteKind),
    /// Nothing matched; the presenter was invoked with the fallback.
    PresentedFallback(RouteKind),
    /// The route is already the current one; nothing happened.
    SuppressedSameRoute,
}

/// Errors that can occur while dispatching a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Nothing matches and no fallback is configured.
    #[error("The provided route: {0} is not mapped")]
    RouteNotFound(String),

    /// No presenter has been configured.
    #[error("No presenter configured; call Dispatcher::set_presenter before dispatching")]
    PresenterUnavailable,

    /// Resolution failed.
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

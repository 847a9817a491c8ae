//! URI-shaped route resolution and dispatch.
//!
//! Routes such as `app://host/laws/i:{lawId}` are registered under one of
//! three kinds, resolved into typed matches, and handed to a presenter.

pub mod config;
pub mod dispatch;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use dispatch::{DispatchFlag, DispatchFlags, Dispatcher, Presentation, Presenter};
pub use routing::{ResolvedRoute, RouteError, RouteKind, RouteRegistry, WildcardValue};

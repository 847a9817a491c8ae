//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch(route, extra args, flags)
//!     → routing::RouteRegistry::resolve
//!     → no match: fallback binding, or RouteNotFound
//!     → same-route suppression (unless override-same-route)
//!     → current route updated, arguments merged
//!     → presenter.rs (external collaborator)
//! ```
//!
//! # Design Decisions
//! - Route kinds are a tagged enum; presenters dispatch on the tag
//! - The only persistent state is the current route

pub mod dispatcher;
pub mod flags;
pub mod presenter;
pub mod types;

pub use dispatcher::Dispatcher;
pub use flags::{DispatchFlag, DispatchFlags};
pub use presenter::{Presentation, Presenter, TracingPresenter};
pub use types::{DispatchError, DispatchOutcome, DispatchResult, Fallback};

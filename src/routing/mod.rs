//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (kind, pattern-key, binding)
//!     → pattern.rs (compile template into scheme, host, segment specs)
//!     → registry.rs (global uniqueness check, store in the kind's table)
//!
//! Resolution:
//!     raw route string
//!     → matcher.rs (split query, parse scheme/host/segments)
//!     → resolver.rs (Direct → Composite → Action, first match wins)
//!     → arguments.rs (typed wildcards + decoded query params)
//!     → ResolvedRoute or explicit no-match
//! ```
//!
//! # Design Decisions
//! - Patterns compiled once at registration, never mutated afterwards
//! - Deterministic: the same registry always resolves a route the same way
//! - Bindings are opaque; the core never inspects them

pub mod arguments;
pub mod matcher;
pub mod pattern;
pub mod registry;
pub mod resolver;
pub mod types;
pub mod uri;

pub use pattern::{RoutePattern, SegmentSpec, WildcardType};
pub use registry::{RouteEntry, RouteRegistry};
pub use types::{ResolvedRoute, RouteError, RouteKind, RouteResult, WildcardValue};

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build registry → Build dispatcher
//!
//! Reload (reload.rs):
//!     New config → Build registry → Swap into the shared dispatcher
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl-C → Trigger shutdown → Watch loop exits
//! ```
//!
//! # Design Decisions
//! - Fail fast: a route table that does not register cleanly is fatal at
//!   startup, and rejected (current table kept) on reload
//! - The process-wide dispatcher lives here, at the composition root

pub mod reload;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{build_dispatcher, build_registry, global, install_global, SharedDispatcher, StartupError};

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registry, resolver and dispatcher produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → stderr (fmt subscriber, filtered by RUST_LOG or config)
//!     → Prometheus text rendering (CLI `--metrics`)
//! ```
//!
//! # Design Decisions
//! - Fields, not formatted strings: `route`, `pattern`, `kind`
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;

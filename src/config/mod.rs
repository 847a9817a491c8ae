//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route table file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (compile patterns, find duplicates)
//!     → RouterConfig (validated, immutable)
//!     → lifecycle::startup builds the registry and dispatcher
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → lifecycle::reload swaps the registry
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{FallbackConfig, ObservabilityConfig, RouteConfig, RouterConfig};
pub use validation::ValidationError;

//! Configuration schema definitions.
//!
//! This module defines the route table file format. All types derive Serde
//! traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::routing::types::RouteKind;

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Route definitions, registered in file order.
    pub routes: Vec<RouteConfig>,

    /// Binding used when nothing matches.
    pub fallback: Option<FallbackConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// One registered route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Table to register in.
    pub kind: RouteKind,

    /// Pattern-key, e.g. `app://host/laws/i:{lawId}`.
    pub pattern: String,

    /// Opaque target name handed to the presenter.
    pub target: String,
}

/// Fallback binding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FallbackConfig {
    #[serde(default = "default_fallback_kind")]
    pub kind: RouteKind,

    pub target: String,
}

fn default_fallback_kind() -> RouteKind {
    RouteKind::Direct
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Install the Prometheus recorder.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
        }
    }
}

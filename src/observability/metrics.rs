//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_registrations_total` (counter): by kind, outcome
//! - `router_resolutions_total` (counter): by matched kind, or `none`
//! - `router_dispatches_total` (counter): by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; cheap no-ops without a recorder
//! - Prometheus recorder installed on demand, rendered as text

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::routing::types::RouteKind;

/// Install a Prometheus recorder and return the handle used to render it.
///
/// Returns `None` if a recorder is already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install metrics recorder");
            None
        }
    }
}

pub fn record_registration(kind: RouteKind, outcome: &'static str) {
    counter!("router_registrations_total", "kind" => kind.as_str(), "outcome" => outcome).increment(1);
}

pub fn record_resolution(kind: Option<RouteKind>) {
    let kind = kind.map(|k| k.as_str()).unwrap_or("none");
    counter!("router_resolutions_total", "kind" => kind).increment(1);
}

pub fn record_dispatch(outcome: &'static str) {
    counter!("router_dispatches_total", "outcome" => outcome).increment(1);
}

//! Route table reload.
//!
//! # Responsibilities
//! - Rebuild the registry from a freshly validated configuration
//! - Swap it into the shared dispatcher under the lock
//!
//! # Design Decisions
//! - The new registry is built outside the lock; only the swap is locked
//! - A table that fails to register leaves the current one in place

use std::sync::PoisonError;

use tokio::sync::{broadcast, mpsc};

use crate::config::RouterConfig;
use crate::lifecycle::startup::{build_registry, SharedDispatcher};
use crate::routing::RouteResult;

/// Apply a reloaded configuration. Returns the new route count.
pub fn apply_config(shared: &SharedDispatcher, config: &RouterConfig) -> RouteResult<usize> {
    let registry = build_registry(&config.routes)?;
    let count = registry.len();

    let mut dispatcher = shared.lock().unwrap_or_else(PoisonError::into_inner);
    dispatcher.replace_registry(registry);
    match &config.fallback {
        Some(fallback) => dispatcher.set_fallback(fallback.kind, fallback.target.clone()),
        None => dispatcher.clear_fallback(),
    }
    Ok(count)
}

/// Apply every configuration received on `updates` until shutdown.
pub async fn run_reload_loop(
    shared: SharedDispatcher,
    mut updates: mpsc::UnboundedReceiver<RouterConfig>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(config) = update else { break };
                match apply_config(&shared, &config) {
                    Ok(count) => tracing::info!(routes = count, "Route table applied"),
                    Err(e) => tracing::error!(error = %e, "Route table rejected, keeping current one"),
                }
            }
            _ = shutdown.recv() => break,
        }
    }
    tracing::debug!("Reload loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;
    use crate::dispatch::Dispatcher;
    use crate::lifecycle::Shutdown;
    use crate::routing::RouteKind;
    use std::sync::{Arc, Mutex};

    fn route(pattern: &str, target: &str) -> RouteConfig {
        RouteConfig {
            kind: RouteKind::Composite,
            pattern: pattern.into(),
            target: target.into(),
        }
    }

    #[test]
    fn test_apply_config_swaps_registry() {
        let shared: SharedDispatcher = Arc::new(Mutex::new(Dispatcher::default()));
        let config = RouterConfig {
            routes: vec![route("app://h/webview", "Web")],
            ..Default::default()
        };

        assert_eq!(apply_config(&shared, &config).unwrap(), 1);
        assert!(shared.lock().unwrap().is_valid_route("app://h/webview"));
    }

    #[test]
    fn test_rejected_config_keeps_current_table() {
        let shared: SharedDispatcher = Arc::new(Mutex::new(Dispatcher::default()));
        let good = RouterConfig {
            routes: vec![route("app://h/webview", "Web")],
            ..Default::default()
        };
        apply_config(&shared, &good).unwrap();

        let bad = RouterConfig {
            routes: vec![route("app://h/a", "A"), route("app://h/a", "B")],
            ..Default::default()
        };
        assert!(apply_config(&shared, &bad).is_err());
        assert!(shared.lock().unwrap().is_valid_route("app://h/webview"));
    }

    #[tokio::test]
    async fn test_reload_loop_applies_updates() {
        let shared: SharedDispatcher = Arc::new(Mutex::new(Dispatcher::default()));
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();

        let task = tokio::spawn(run_reload_loop(shared.clone(), rx, shutdown.subscribe()));
        tx.send(RouterConfig {
            routes: vec![route("app://h/files/i:{fileId}", "Download")],
            ..Default::default()
        })
        .unwrap();
        drop(tx);
        task.await.unwrap();

        assert!(shared.lock().unwrap().is_valid_route("app://h/files/7"));
    }
}

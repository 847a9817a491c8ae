//! Startup orchestration.
//!
//! # Responsibilities
//! - Register every route, then build the dispatcher
//! - Optionally publish one process-wide dispatcher
//!
//! # Design Decisions
//! - Fail fast: any registration error is fatal
//! - All registration happens before the first resolution
//! - The shared instance is a convenience for the composition root only;
//!   the core never reaches for it

use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;

use crate::config::{RouteConfig, RouterConfig};
use crate::dispatch::Dispatcher;
use crate::routing::{RouteError, RouteRegistry};

/// Dispatcher shared behind a lock, so registration and resolution are
/// serialized.
pub type SharedDispatcher = Arc<Mutex<Dispatcher<String>>>;

static GLOBAL: OnceLock<SharedDispatcher> = OnceLock::new();

/// Errors raised while publishing the shared dispatcher.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("A process-wide dispatcher is already installed")]
    AlreadyInstalled,
}

/// Register every configured route, in file order.
pub fn build_registry(routes: &[RouteConfig]) -> Result<RouteRegistry<String>, RouteError> {
    let mut registry = RouteRegistry::new();
    for route in routes {
        registry.register(route.kind, route.pattern.as_str(), route.target.clone())?;
    }
    Ok(registry)
}

/// Build a dispatcher (without presenter) from a validated configuration.
pub fn build_dispatcher(config: &RouterConfig) -> Result<Dispatcher<String>, RouteError> {
    let registry = build_registry(&config.routes)?;
    let mut dispatcher = Dispatcher::new(registry);
    if let Some(fallback) = &config.fallback {
        dispatcher.set_fallback(fallback.kind, fallback.target.clone());
    }

    tracing::info!(
        routes = dispatcher.registry().len(),
        fallback = config.fallback.is_some(),
        "Dispatcher built"
    );
    Ok(dispatcher)
}

/// Publish `dispatcher` as the process-wide instance.
pub fn install_global(dispatcher: Dispatcher<String>) -> Result<&'static SharedDispatcher, StartupError> {
    let mut installed = false;
    let shared = GLOBAL.get_or_init(|| {
        installed = true;
        Arc::new(Mutex::new(dispatcher))
    });

    if installed {
        Ok(shared)
    } else {
        Err(StartupError::AlreadyInstalled)
    }
}

/// The process-wide dispatcher, if one was installed.
pub fn global() -> Option<&'static SharedDispatcher> {
    GLOBAL.get()
}

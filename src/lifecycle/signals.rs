//! OS signal handling.
//!
//! Ctrl-C (SIGINT) ends watch mode through the shared [`Shutdown`].

use crate::lifecycle::shutdown::Shutdown;

/// Wait for Ctrl-C, then trigger `shutdown`.
pub async fn shutdown_on_ctrl_c(shutdown: &Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => shutdown.trigger(),
        Err(e) => tracing::error!(error = %e, "Unable to listen for Ctrl-C"),
    }
}

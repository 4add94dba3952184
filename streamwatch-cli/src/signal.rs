//! Shutdown signal handling.
//!
//! SIGINT and SIGTERM cancel a shared `CancellationToken`; the producer and
//! the processor check it between events.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Wait for a shutdown signal (SIGTERM or SIGINT).
///
/// Returns the name of the signal that triggered the shutdown.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("failed to install SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("failed to install SIGINT handler: {}", e))?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for Ctrl+C.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("failed to install Ctrl+C handler: {}", e))?;
    Ok("SIGINT")
}

/// Spawns a task that cancels `cancel` on the first shutdown signal.
///
/// The task also ends quietly if `cancel` is cancelled by someone else.
pub fn spawn_signal_handler(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = wait_for_shutdown_signal() => match result {
                Ok(signal) => {
                    tracing::info!(signal, "shutdown signal received");
                    cancel.cancel();
                }
                Err(e) => tracing::error!(error = %e, "signal handler unavailable"),
            },
            _ = cancel.cancelled() => {}
        }
    })
}

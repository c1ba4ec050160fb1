//! OS shutdown signals.

use tokio_util::sync::CancellationToken;

/// Cancels `cancellation` on SIGINT or SIGTERM.
pub(crate) async fn cancel_on_shutdown(cancellation: CancellationToken) {
    tokio::select! {
        _ = ctrl_c() => info!(target: "indexer", "Received SIGINT, shutting down"),
        _ = terminate() => info!(target: "indexer", "Received SIGTERM, shutting down"),
        _ = cancellation.cancelled() => return,
    }
    cancellation.cancel();
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target: "indexer", %err, "Failed to listen for SIGINT");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            error!(target: "indexer", %err, "Failed to listen for SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

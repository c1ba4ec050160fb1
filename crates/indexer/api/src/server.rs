//! HTTP listener.

use crate::{ApiState, router};
use std::{io, net::SocketAddr};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Serves the API on `addr` until `cancellation` fires.
pub async fn serve(
    addr: SocketAddr,
    state: ApiState,
    cancellation: CancellationToken,
) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(target: "api", addr = %listener.local_addr()?, "Serving bridge API");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { cancellation.cancelled().await })
        .await
}

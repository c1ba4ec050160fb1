//! Bounded retries of chain requests.

use crate::ClientError;
use backon::{ExponentialBuilder, Retryable};
use std::{future::Future, time::Duration};

/// Attempts made for a chain request before its error is surfaced.
pub(crate) const RPC_ATTEMPTS: usize = 3;

const RPC_RETRY_MIN_DELAY: Duration = Duration::from_millis(250);

/// Runs `request`, retrying transient failures with exponential backoff.
pub(crate) async fn with_retry<T, F, Fut>(request: F) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    request
        .retry(
            ExponentialBuilder::default()
                .with_min_delay(RPC_RETRY_MIN_DELAY)
                .with_max_times(RPC_ATTEMPTS - 1),
        )
        .when(ClientError::is_transient)
        .notify(|err, after| {
            warn!(target: "rpc", %err, ?after, "Chain request failed, retrying");
        })
        .await
}

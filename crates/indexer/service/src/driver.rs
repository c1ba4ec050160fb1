//! The loop driving a [`ChainIndexer`].

use crate::{ChainIndexer, HeadTracker, IndexerError, Metrics, UpdateOutcome};
use boba_indexer_db::BlockHeader;
use tokio::time::{MissedTickBehavior, interval, sleep};
use tokio_util::sync::CancellationToken;

/// Runs an indexer: catches up with the chain head in large steps, then follows the tip on a
/// ticker.
///
/// Recoverable errors pause the loop for the configured retry delay. Fatal errors stop it.
#[derive(Debug)]
pub struct IndexerDriver<I> {
    indexer: I,
    head: HeadTracker,
    cancellation: CancellationToken,
}

impl<I: ChainIndexer> IndexerDriver<I> {
    /// Creates a driver publishing observed chain heads to `head`.
    pub const fn new(indexer: I, head: HeadTracker, cancellation: CancellationToken) -> Self {
        Self { indexer, head, cancellation }
    }

    /// Returns the driven indexer.
    pub fn into_inner(self) -> I {
        self.indexer
    }

    /// Runs until cancelled or a fatal error occurs.
    pub async fn run(&mut self) -> Result<(), IndexerError> {
        let side = self.indexer.side();
        info!(target: "indexer", %side, "Starting indexer");

        Metrics::record_catching_up(side, true);
        let caught_up = self.catch_up().await;
        Metrics::record_catching_up(side, false);
        if !caught_up? {
            return Ok(());
        }

        info!(target: "indexer", %side, "Caught up with the chain head, following the tip");
        self.follow_tip().await
    }

    /// Updates while the persisted height trails the confirmed head by more than one batch.
    ///
    /// Returns `false` if cancelled.
    async fn catch_up(&mut self) -> Result<bool, IndexerError> {
        let conf_depth = self.indexer.config().conf_depth;
        let max_batch = self.indexer.config().max_header_batch_size;

        loop {
            if self.cancellation.is_cancelled() {
                return Ok(false);
            }

            let cancellation = self.cancellation.clone();
            let result = tokio::select! {
                biased;
                _ = cancellation.cancelled() => return Ok(false),
                result = self.catch_up_step(conf_depth, max_batch) => result,
            };

            match result {
                Ok(None) => return Ok(true),
                Ok(Some(_)) => {}
                Err(err) => {
                    if !self.recover(err).await? {
                        return Ok(false);
                    }
                }
            }
        }
    }

    /// Runs one catch-up update, or returns `None` once the head is within one batch.
    async fn catch_up_step(
        &mut self,
        conf_depth: u64,
        max_batch: u64,
    ) -> Result<Option<UpdateOutcome>, IndexerError> {
        let head = self.indexer.chain_head().await?;
        self.head.set(head.number);
        let lowest = self.indexer.resume_point().await?;
        if head.number.saturating_sub(conf_depth) <= lowest.number.saturating_add(max_batch) {
            return Ok(None);
        }
        self.indexer.update(&head).await.map(Some)
    }

    async fn follow_tip(&mut self) -> Result<(), IndexerError> {
        let side = self.indexer.side();
        let mut ticker = interval(self.indexer.config().poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => {
                    info!(target: "indexer", %side, "Indexer cancellation requested, stopping...");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    let head = match self.indexer.chain_head().await {
                        Ok(head) => head,
                        Err(err) => {
                            Metrics::record_update_error(side);
                            warn!(target: "indexer", %side, %err, "Failed to fetch chain head");
                            continue;
                        }
                    };
                    self.head.set(head.number);
                    self.process_head(&head).await?;
                }
            }
        }
    }

    /// Updates until no confirmed blocks remain under `head`, or an update fails.
    async fn process_head(&mut self, head: &BlockHeader) -> Result<(), IndexerError> {
        let side = self.indexer.side();
        loop {
            let result = tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => return Ok(()),
                result = self.indexer.update(head) => result,
            };

            match result {
                Ok(UpdateOutcome::Progressed) => {}
                Ok(UpdateOutcome::NoNewBlocks) => return Ok(()),
                Err(err) if err.is_fatal() => {
                    Metrics::record_update_error(side);
                    error!(target: "indexer", %side, %err, "Fatal indexer error, stopping");
                    return Err(err);
                }
                Err(err) => {
                    // Retried on the next tick.
                    Metrics::record_update_error(side);
                    warn!(target: "indexer", %side, %err, "Indexer update failed");
                    return Ok(());
                }
            }
        }
    }

    /// Handles a failed catch-up step. Returns `false` if cancelled during the pause.
    async fn recover(&self, err: IndexerError) -> Result<bool, IndexerError> {
        let side = self.indexer.side();
        Metrics::record_update_error(side);
        if err.is_fatal() {
            error!(target: "indexer", %side, %err, "Fatal indexer error, stopping");
            return Err(err);
        }

        let delay = self.indexer.config().retry_delay;
        warn!(target: "indexer", %side, %err, ?delay, "Indexer update failed, retrying");
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Ok(false),
            _ = sleep(delay) => Ok(true),
        }
    }
}

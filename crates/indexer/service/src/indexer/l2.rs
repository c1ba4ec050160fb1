//! The L2 indexer.

use super::{ChainIndexer, Side, UpdateOutcome, check_continuity, outcome};
use crate::{
    ChainClient, ConfirmedHeaderSelector, IndexerConfig, IndexerError, Metrics, TokenCache,
    bridge::L2StandardBridge, retry::with_retry,
};
use async_trait::async_trait;
use boba_indexer_bindings::BridgeAddresses;
use boba_indexer_db::{BlockHeader, BlockLocator, BridgeStore, IndexedL2Block};
use std::{sync::Arc, time::Instant};

/// Indexes withdrawals initiated on L2.
#[derive(Debug)]
pub struct L2Indexer<C, S> {
    config: IndexerConfig,
    selector: ConfirmedHeaderSelector,
    client: Arc<C>,
    store: Arc<S>,
    bridge: L2StandardBridge,
    tokens: TokenCache,
}

impl<C, S> L2Indexer<C, S>
where
    C: ChainClient + 'static,
    S: BridgeStore + 'static,
{
    /// Creates an L2 indexer reading the L2 contracts of `addresses`.
    ///
    /// Withdrawal hashes are only read from the message passer after the Bedrock upgrade.
    pub fn new(
        config: IndexerConfig,
        post_upgrade: bool,
        addresses: &BridgeAddresses,
        client: Arc<C>,
        store: Arc<S>,
    ) -> Result<Self, IndexerError> {
        let selector = config.selector()?;
        let message_passer = post_upgrade.then_some(addresses.l2_message_passer);
        Ok(Self {
            config,
            selector,
            client,
            store,
            bridge: L2StandardBridge::new(addresses.l2_standard_bridge, message_passer),
            tokens: TokenCache::new(Side::L2),
        })
    }

    /// The token metadata cached so far.
    pub const fn tokens(&self) -> &TokenCache {
        &self.tokens
    }
}

#[async_trait]
impl<C, S> ChainIndexer for L2Indexer<C, S>
where
    C: ChainClient + 'static,
    S: BridgeStore + 'static,
{
    fn side(&self) -> Side {
        Side::L2
    }

    fn config(&self) -> &IndexerConfig {
        &self.config
    }

    async fn chain_head(&self) -> Result<BlockHeader, IndexerError> {
        Ok(with_retry(|| self.client.latest_header()).await?)
    }

    async fn resume_point(&self) -> Result<BlockLocator, IndexerError> {
        if let Some(highest) = self.store.get_highest_l2_block().await? {
            return Ok(highest);
        }

        let start = self.config.start_block_number;
        let header = with_retry(|| self.client.header_by_number(start))
            .await?
            .ok_or(IndexerError::MissingHeader(start))?;
        self.store.add_indexed_l2_block(&IndexedL2Block::empty(header)).await?;
        info!(
            target: "l2_indexer",
            number = header.number,
            hash = %header.hash,
            "Starting from block"
        );
        Ok(header.locator())
    }

    async fn update(&mut self, head: &BlockHeader) -> Result<UpdateOutcome, IndexerError> {
        let started = Instant::now();
        let lowest = self.resume_point().await?;
        let headers = self.selector.new_headers(self.client.as_ref(), lowest, head).await?;
        let (Some(first), Some(last)) = (headers.first(), headers.last()) else {
            return Ok(UpdateOutcome::NoNewBlocks);
        };
        check_continuity(Side::L2, lowest, first)?;
        let (start, end) = (first.number, last.number);

        let mut withdrawals =
            self.bridge.withdrawals_by_block_range(self.client.as_ref(), start, end).await?;

        let (client, store) = (self.client.as_ref(), self.store.as_ref());
        for withdrawal in withdrawals.values().flatten() {
            self.tokens.ensure(withdrawal.l2_token, client, store).await?;
        }

        let mut withdrawal_count = 0;
        for (i, header) in headers.iter().enumerate() {
            let block = IndexedL2Block {
                header: *header,
                withdrawals: withdrawals.remove(&header.hash).unwrap_or_default(),
            };
            if block.withdrawals.is_empty() && i + 1 < headers.len() {
                continue;
            }

            self.store.add_indexed_l2_block(&block).await?;
            debug!(
                target: "l2_indexer",
                number = header.number,
                withdrawals = block.withdrawals.len(),
                "Imported block"
            );

            block.withdrawals.iter().for_each(|w| Metrics::record_withdrawal(w.l2_token));
            withdrawal_count += block.withdrawals.len();
        }

        info!(
            target: "l2_indexer",
            start_height = start,
            end_height = end,
            head = head.number,
            withdrawals = withdrawal_count,
            "Indexed L2 blocks"
        );
        Metrics::record_sync(Side::L2, end, head.number, started.elapsed());
        Ok(outcome(end, self.config.conf_depth, head.number))
    }
}

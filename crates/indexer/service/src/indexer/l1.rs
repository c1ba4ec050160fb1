//! The L1 indexer.

use super::{ChainIndexer, Side, UpdateOutcome, check_continuity, outcome};
use crate::{
    ChainClient, ConfirmedHeaderSelector, IndexerConfig, IndexerError, Metrics, ReaderError,
    TokenCache,
    bridge::{
        DepositsMap, EthBridge, FinalizedWithdrawalsMap, L1Bridge, Portal, ProvenWithdrawalsMap,
        StandardBridge, StateBatchesMap, StateCommitmentChain,
    },
    retry::with_retry,
};
use async_trait::async_trait;
use boba_indexer_bindings::BridgeAddresses;
use boba_indexer_db::{BlockHeader, BlockLocator, BridgeStore, IndexedL1Block};
use futures::future::try_join_all;
use std::{sync::Arc, time::Instant};

/// Indexes deposits, withdrawal proofs and finalizations, and state batches from L1.
///
/// After the Bedrock upgrade withdrawals are proven and finalized on the portal. Before it,
/// state batches are read from the state commitment chain instead.
#[derive(Debug)]
pub struct L1Indexer<C, S> {
    config: IndexerConfig,
    selector: ConfirmedHeaderSelector,
    client: Arc<C>,
    store: Arc<S>,
    bridges: Vec<Box<dyn L1Bridge>>,
    portal: Option<Portal>,
    state_commitment_chain: Option<StateCommitmentChain>,
    tokens: TokenCache,
}

impl<C, S> L1Indexer<C, S>
where
    C: ChainClient + 'static,
    S: BridgeStore + 'static,
{
    /// Creates an L1 indexer reading the contracts of `addresses`.
    ///
    /// Fails if the configuration is invalid or the contract the mode depends on is missing.
    pub fn new(
        config: IndexerConfig,
        post_upgrade: bool,
        addresses: &BridgeAddresses,
        client: Arc<C>,
        store: Arc<S>,
    ) -> Result<Self, IndexerError> {
        let selector = config.selector()?;

        let mut bridges: Vec<Box<dyn L1Bridge>> = vec![
            Box::new(StandardBridge::new("Standard", addresses.l1_standard_bridge)),
            Box::new(EthBridge::new(addresses.l1_eth_bridge)),
        ];
        bridges.extend(addresses.custom_bridges.iter().map(|custom| {
            Box::new(StandardBridge::new(custom.name.clone(), custom.address)) as Box<dyn L1Bridge>
        }));

        let (portal, state_commitment_chain) = if post_upgrade {
            let portal = addresses.optimism_portal.ok_or_else(|| {
                IndexerError::Config("the portal address is required after the upgrade".into())
            })?;
            (Some(Portal::new(portal)), None)
        } else {
            let scc = addresses.state_commitment_chain.ok_or_else(|| {
                IndexerError::Config(
                    "the state commitment chain address is required before the upgrade".into(),
                )
            })?;
            (None, Some(StateCommitmentChain::new(scc)))
        };

        Ok(Self {
            config,
            selector,
            client,
            store,
            bridges,
            portal,
            state_commitment_chain,
            tokens: TokenCache::new(Side::L1),
        })
    }

    /// The token metadata cached so far.
    pub const fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    async fn read_events(
        &self,
        start: u64,
        end: u64,
    ) -> Result<
        (DepositsMap, ProvenWithdrawalsMap, FinalizedWithdrawalsMap, StateBatchesMap),
        IndexerError,
    > {
        let client: &dyn ChainClient = self.client.as_ref();

        let deposits = async {
            let per_bridge = try_join_all(
                self.bridges.iter().map(|bridge| bridge.deposits_by_block_range(client, start, end)),
            )
            .await?;
            let mut merged = DepositsMap::new();
            for map in per_bridge {
                for (block_hash, deposits) in map {
                    merged.entry(block_hash).or_default().extend(deposits);
                }
            }
            merged.values_mut().for_each(|deposits| deposits.sort_by_key(|d| d.log_index));
            Ok::<_, ReaderError>(merged)
        };
        let proven = async {
            match &self.portal {
                Some(portal) => portal.proven_withdrawals_by_block_range(client, start, end).await,
                None => Ok(ProvenWithdrawalsMap::new()),
            }
        };
        let finalized = async {
            match &self.portal {
                Some(portal) => {
                    portal.finalized_withdrawals_by_block_range(client, start, end).await
                }
                None => Ok(FinalizedWithdrawalsMap::new()),
            }
        };
        let batches = async {
            match &self.state_commitment_chain {
                Some(scc) => scc.state_batches_by_block_range(client, start, end).await,
                None => Ok(StateBatchesMap::new()),
            }
        };

        Ok(tokio::try_join!(deposits, proven, finalized, batches)?)
    }
}

#[async_trait]
impl<C, S> ChainIndexer for L1Indexer<C, S>
where
    C: ChainClient + 'static,
    S: BridgeStore + 'static,
{
    fn side(&self) -> Side {
        Side::L1
    }

    fn config(&self) -> &IndexerConfig {
        &self.config
    }

    async fn chain_head(&self) -> Result<BlockHeader, IndexerError> {
        Ok(with_retry(|| self.client.latest_header()).await?)
    }

    async fn resume_point(&self) -> Result<BlockLocator, IndexerError> {
        if let Some(highest) = self.store.get_highest_l1_block().await? {
            return Ok(highest);
        }

        let start = self.config.start_block_number;
        let header = with_retry(|| self.client.header_by_number(start))
            .await?
            .ok_or(IndexerError::MissingHeader(start))?;
        self.store.add_indexed_l1_block(&IndexedL1Block::empty(header)).await?;
        info!(
            target: "l1_indexer",
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
        check_continuity(Side::L1, lowest, first)?;
        let (start, end) = (first.number, last.number);

        let (mut deposits, mut proven, mut finalized, mut batches) =
            self.read_events(start, end).await?;

        let (client, store) = (self.client.as_ref(), self.store.as_ref());
        for deposit in deposits.values().flatten() {
            self.tokens.ensure(deposit.l1_token, client, store).await?;
        }

        let (mut deposit_count, mut batch_count) = (0, 0);
        for (i, header) in headers.iter().enumerate() {
            let block = IndexedL1Block {
                header: *header,
                deposits: deposits.remove(&header.hash).unwrap_or_default(),
                proven_withdrawals: proven.remove(&header.hash).unwrap_or_default(),
                finalized_withdrawals: finalized.remove(&header.hash).unwrap_or_default(),
                state_batches: batches.remove(&header.hash).unwrap_or_default(),
            };
            if block.is_empty() && i + 1 < headers.len() {
                continue;
            }

            self.store.add_indexed_l1_block(&block).await?;
            debug!(
                target: "l1_indexer",
                number = header.number,
                deposits = block.deposits.len(),
                proven = block.proven_withdrawals.len(),
                finalized = block.finalized_withdrawals.len(),
                state_batches = block.state_batches.len(),
                "Imported block"
            );

            block.deposits.iter().for_each(|d| Metrics::record_deposit(d.l1_token));
            Metrics::record_state_batches(block.state_batches.len());
            deposit_count += block.deposits.len();
            batch_count += block.state_batches.len();
        }

        info!(
            target: "l1_indexer",
            start_height = start,
            end_height = end,
            head = head.number,
            deposits = deposit_count,
            state_batches = batch_count,
            "Indexed L1 blocks"
        );
        Metrics::record_sync(Side::L1, end, head.number, started.elapsed());
        Ok(outcome(end, self.config.conf_depth, head.number))
    }
}

//! Bridge event readers.
//!
//! Readers are stateless: each call filters the logs of one contract over a block range and
//! groups the decoded events by the hash of the block that emitted them.

use crate::{ChainClient, ReaderError, retry::with_retry};
use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::{Filter, Log};
use boba_indexer_bindings::BridgeEvent;
use boba_indexer_db::{Deposit, FinalizedWithdrawal, ProvenWithdrawal, StateBatch, Withdrawal};
use std::collections::HashMap;

mod l1;
pub use l1::{EthBridge, L1Bridge, StandardBridge};

mod l2;
pub use l2::L2StandardBridge;

mod portal;
pub use portal::Portal;

mod scc;
pub use scc::StateCommitmentChain;

/// Deposits keyed by block hash.
pub type DepositsMap = HashMap<B256, Vec<Deposit>>;

/// Withdrawals keyed by block hash.
pub type WithdrawalsMap = HashMap<B256, Vec<Withdrawal>>;

/// Proven withdrawals keyed by block hash.
pub type ProvenWithdrawalsMap = HashMap<B256, Vec<ProvenWithdrawal>>;

/// Finalized withdrawals keyed by block hash.
pub type FinalizedWithdrawalsMap = HashMap<B256, Vec<FinalizedWithdrawal>>;

/// State batches keyed by block hash.
pub type StateBatchesMap = HashMap<B256, Vec<StateBatch>>;

/// Position of a log on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LogMeta {
    pub(crate) block_hash: B256,
    pub(crate) block_number: u64,
    pub(crate) tx_hash: B256,
    pub(crate) log_index: u64,
}

impl TryFrom<&Log> for LogMeta {
    type Error = ReaderError;

    fn try_from(log: &Log) -> Result<Self, Self::Error> {
        Ok(Self {
            block_hash: log.block_hash.ok_or(ReaderError::IncompleteLog("block hash"))?,
            block_number: log.block_number.ok_or(ReaderError::IncompleteLog("block number"))?,
            tx_hash: log.transaction_hash.ok_or(ReaderError::IncompleteLog("transaction hash"))?,
            log_index: log.log_index.ok_or(ReaderError::IncompleteLog("log index"))?,
        })
    }
}

/// Fetches and decodes the events of `address` matching `signatures` in `start..=end`,
/// ordered by position on chain.
pub(crate) async fn fetch_events<C: ChainClient + ?Sized>(
    client: &C,
    address: Address,
    signatures: Vec<B256>,
    start: u64,
    end: u64,
) -> Result<Vec<(LogMeta, BridgeEvent)>, ReaderError> {
    let filter =
        Filter::new().address(address).event_signature(signatures).from_block(start).to_block(end);
    let logs = with_retry(|| client.logs(&filter)).await?;

    let mut events = Vec::with_capacity(logs.len());
    for log in logs.iter().filter(|log| !log.removed) {
        let Some(event) = BridgeEvent::decode(&log.inner)? else {
            continue;
        };
        events.push((LogMeta::try_from(log)?, event));
    }
    events.sort_by_key(|(meta, _)| (meta.block_number, meta.log_index));

    trace!(
        target: "bridge_reader",
        %address,
        start_height = start,
        end_height = end,
        events = events.len(),
        "Fetched bridge events"
    );
    Ok(events)
}

/// Groups `items` by the block hash of their log.
pub(crate) fn group_by_block<T>(
    items: impl IntoIterator<Item = (LogMeta, T)>,
) -> HashMap<B256, Vec<T>> {
    let mut map: HashMap<B256, Vec<T>> = HashMap::new();
    for (meta, item) in items {
        map.entry(meta.block_hash).or_default().push(item);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockChain;
    use alloy_primitives::{Bytes, U256};
    use alloy_sol_types::SolEvent;
    use boba_indexer_bindings::abi::IL1StandardBridge::ETHDepositInitiated;

    #[tokio::test]
    async fn test_fetch_events_filters_range_and_address() {
        let chain = MockChain::new(1, 0, 10);
        let bridge = Address::repeat_byte(0x11);
        let event = |amount: u64| ETHDepositInitiated {
            from: Address::repeat_byte(1),
            to: Address::repeat_byte(2),
            amount: U256::from(amount),
            extraData: Bytes::new(),
        };
        chain.push_event(2, bridge, &event(1));
        chain.push_event(4, bridge, &event(2));
        chain.push_event(4, bridge, &event(3));
        chain.push_event(4, Address::repeat_byte(0x22), &event(4));
        chain.push_event(8, bridge, &event(5));

        let events =
            fetch_events(&chain, bridge, vec![ETHDepositInitiated::SIGNATURE_HASH], 3, 7)
                .await
                .unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|(meta, _)| meta.block_hash == chain.header(4).hash));
        assert!(events[0].0.log_index < events[1].0.log_index);

        let grouped = group_by_block(events);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[&chain.header(4).hash].len(), 2);
    }

    #[test]
    fn test_pending_log_is_incomplete() {
        let log = Log::default();
        assert!(matches!(LogMeta::try_from(&log), Err(ReaderError::IncompleteLog("block hash"))));
    }
}

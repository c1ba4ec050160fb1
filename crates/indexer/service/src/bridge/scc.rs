//! The legacy state commitment chain.

use super::{StateBatchesMap, fetch_events, group_by_block};
use crate::{ChainClient, ReaderError};
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolEvent;
use boba_indexer_bindings::{
    BridgeEvent, DecodeError, abi::IStateCommitmentChain::StateBatchAppended,
};
use boba_indexer_db::StateBatch;

/// Reads state batches appended to the state commitment chain before the Bedrock upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCommitmentChain {
    address: Address,
}

impl StateCommitmentChain {
    /// Creates a reader for the contract at `address`.
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// Returns the state batches appended in `start..=end`.
    pub async fn state_batches_by_block_range(
        &self,
        client: &dyn ChainClient,
        start: u64,
        end: u64,
    ) -> Result<StateBatchesMap, ReaderError> {
        let signatures = vec![StateBatchAppended::SIGNATURE_HASH];
        let events = fetch_events(client, self.address, signatures, start, end).await?;

        let mut batches = Vec::with_capacity(events.len());
        for (meta, event) in events {
            let BridgeEvent::StateBatchAppended(event) = event else {
                continue;
            };
            let batch = StateBatch {
                index: narrow("batchIndex", event.batchIndex)?,
                root: event.batchRoot,
                size: narrow("batchSize", event.batchSize)?,
                prev_total: narrow("prevTotalElements", event.prevTotalElements)?,
                extra_data: event.extraData,
                block_hash: meta.block_hash,
            };
            batches.push((meta, batch));
        }
        Ok(group_by_block(batches))
    }
}

fn narrow(field: &'static str, value: U256) -> Result<u64, DecodeError> {
    u64::try_from(value).map_err(|_| DecodeError::OutOfRange { field, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockChain;
    use alloy_primitives::{B256, Bytes};

    fn appended(index: u64, size: u64, prev_total: U256) -> StateBatchAppended {
        StateBatchAppended {
            batchIndex: U256::from(index),
            batchRoot: B256::repeat_byte(index as u8),
            batchSize: U256::from(size),
            prevTotalElements: prev_total,
            extraData: Bytes::new(),
        }
    }

    #[tokio::test]
    async fn test_state_batches() {
        let chain = MockChain::new(1, 0, 4);
        let address = Address::repeat_byte(0x5c);
        chain.push_event(3, address, &appended(5, 25, U256::from(80)));

        let scc = StateCommitmentChain::new(address);
        let batches = scc.state_batches_by_block_range(&chain, 1, 3).await.unwrap();
        let batch = &batches[&chain.header(3).hash][0];
        assert_eq!((batch.index, batch.size, batch.prev_total), (5, 25, 80));
        assert_eq!(batch.block_hash, chain.header(3).hash);
    }

    #[tokio::test]
    async fn test_oversized_field_is_rejected() {
        let chain = MockChain::new(1, 0, 4);
        let address = Address::repeat_byte(0x5c);
        chain.push_event(2, address, &appended(1, 1, U256::MAX));

        let scc = StateCommitmentChain::new(address);
        let err = scc.state_batches_by_block_range(&chain, 1, 3).await.unwrap_err();
        assert!(matches!(
            err,
            ReaderError::Decode(DecodeError::OutOfRange { field: "prevTotalElements", .. })
        ));
    }
}

//! The L1 portal, which proves and finalizes withdrawals after the Bedrock upgrade.

use super::{FinalizedWithdrawalsMap, ProvenWithdrawalsMap, fetch_events, group_by_block};
use crate::{ChainClient, ReaderError};
use alloy_primitives::Address;
use alloy_sol_types::SolEvent;
use boba_indexer_bindings::{
    BridgeEvent,
    abi::IOptimismPortal::{WithdrawalFinalized, WithdrawalProven},
};
use boba_indexer_db::{FinalizedWithdrawal, ProvenWithdrawal};

/// Reads withdrawal proofs and finalizations from the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portal {
    address: Address,
}

impl Portal {
    /// Creates a reader for the portal at `address`.
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// Returns the withdrawals proven in `start..=end`.
    pub async fn proven_withdrawals_by_block_range(
        &self,
        client: &dyn ChainClient,
        start: u64,
        end: u64,
    ) -> Result<ProvenWithdrawalsMap, ReaderError> {
        let signatures = vec![WithdrawalProven::SIGNATURE_HASH];
        let events = fetch_events(client, self.address, signatures, start, end).await?;

        let proven = events.into_iter().filter_map(|(meta, event)| match event {
            BridgeEvent::WithdrawalProven(event) => Some((
                meta,
                ProvenWithdrawal {
                    withdrawal_hash: event.withdrawalHash,
                    tx_hash: meta.tx_hash,
                    log_index: meta.log_index,
                },
            )),
            _ => None,
        });
        Ok(group_by_block(proven))
    }

    /// Returns the withdrawals finalized in `start..=end`.
    pub async fn finalized_withdrawals_by_block_range(
        &self,
        client: &dyn ChainClient,
        start: u64,
        end: u64,
    ) -> Result<FinalizedWithdrawalsMap, ReaderError> {
        let signatures = vec![WithdrawalFinalized::SIGNATURE_HASH];
        let events = fetch_events(client, self.address, signatures, start, end).await?;

        let finalized = events.into_iter().filter_map(|(meta, event)| match event {
            BridgeEvent::WithdrawalFinalized(event) => Some((
                meta,
                FinalizedWithdrawal {
                    withdrawal_hash: event.withdrawalHash,
                    tx_hash: meta.tx_hash,
                    log_index: meta.log_index,
                    success: event.success,
                },
            )),
            _ => None,
        });
        Ok(group_by_block(finalized))
    }
}

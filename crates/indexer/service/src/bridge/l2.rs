//! The L2 withdrawal bridge.

use super::{WithdrawalsMap, fetch_events, group_by_block};
use crate::{ChainClient, ReaderError};
use alloy_primitives::{Address, B256};
use alloy_sol_types::SolEvent;
use boba_indexer_bindings::{
    BridgeEvent,
    abi::{IL2StandardBridge::WithdrawalInitiated, IL2ToL1MessagePasser::MessagePassed},
};
use boba_indexer_db::Withdrawal;
use std::collections::HashMap;
use uuid::Uuid;

/// Reads withdrawals initiated on the L2 standard bridge.
///
/// When a message passer is configured, each withdrawal is tagged with the hash of the
/// `MessagePassed` event that follows it in the same transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct L2StandardBridge {
    bridge: Address,
    message_passer: Option<Address>,
}

impl L2StandardBridge {
    /// Creates a reader for the bridge at `bridge`.
    pub const fn new(bridge: Address, message_passer: Option<Address>) -> Self {
        Self { bridge, message_passer }
    }

    /// Returns the withdrawals initiated in `start..=end`.
    pub async fn withdrawals_by_block_range(
        &self,
        client: &dyn ChainClient,
        start: u64,
        end: u64,
    ) -> Result<WithdrawalsMap, ReaderError> {
        let initiated = fetch_events(
            client,
            self.bridge,
            vec![WithdrawalInitiated::SIGNATURE_HASH],
            start,
            end,
        );
        let passed = async {
            match self.message_passer {
                Some(passer) => {
                    let signatures = vec![MessagePassed::SIGNATURE_HASH];
                    fetch_events(client, passer, signatures, start, end).await
                }
                None => Ok(Vec::new()),
            }
        };
        let (initiated, passed) = tokio::try_join!(initiated, passed)?;

        // Message hashes per transaction, ordered by log index.
        let mut messages: HashMap<B256, Vec<(u64, B256)>> = HashMap::new();
        for (meta, event) in passed {
            if let BridgeEvent::MessagePassed(event) = event {
                let entry = (meta.log_index, event.withdrawalHash);
                messages.entry(meta.tx_hash).or_default().push(entry);
            }
        }

        let withdrawals = initiated.into_iter().filter_map(|(meta, event)| {
            let BridgeEvent::WithdrawalInitiated(event) = event else {
                return None;
            };
            let withdrawal_hash = messages.get_mut(&meta.tx_hash).and_then(|passed| {
                let position = passed.iter().position(|(index, _)| *index > meta.log_index)?;
                Some(passed.remove(position).1)
            });
            let withdrawal = Withdrawal {
                guid: Uuid::new_v4(),
                tx_hash: meta.tx_hash,
                l1_token: event.l1Token,
                l2_token: event.l2Token,
                from: event.from,
                to: event.to,
                amount: event.amount,
                data: event.extraData,
                log_index: meta.log_index,
                withdrawal_hash,
            };
            Some((meta, withdrawal))
        });
        Ok(group_by_block(withdrawals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockChain;
    use alloy_primitives::{Bytes, U256};
    use boba_indexer_bindings::{L2_STANDARD_BRIDGE, L2_TO_L1_MESSAGE_PASSER};

    fn initiated(amount: u64) -> WithdrawalInitiated {
        WithdrawalInitiated {
            l1Token: Address::repeat_byte(0x71),
            l2Token: Address::repeat_byte(0x72),
            from: Address::repeat_byte(0x0a),
            to: Address::repeat_byte(0x0b),
            amount: U256::from(amount),
            extraData: Bytes::new(),
        }
    }

    fn passed(hash: u8) -> MessagePassed {
        MessagePassed {
            nonce: U256::from(hash),
            sender: L2_STANDARD_BRIDGE,
            target: Address::repeat_byte(0x99),
            value: U256::ZERO,
            gasLimit: U256::from(200_000),
            data: Bytes::new(),
            withdrawalHash: B256::repeat_byte(hash),
        }
    }

    #[tokio::test]
    async fn test_attaches_following_message_hash() {
        let chain = MockChain::new(10, 1, 5);
        let tx = B256::repeat_byte(0xd1);
        chain.push_event_in_tx(2, tx, L2_STANDARD_BRIDGE, &initiated(1));
        chain.push_event_in_tx(2, tx, L2_TO_L1_MESSAGE_PASSER, &passed(0xa1));
        chain.push_event_in_tx(2, tx, L2_STANDARD_BRIDGE, &initiated(2));
        chain.push_event_in_tx(2, tx, L2_TO_L1_MESSAGE_PASSER, &passed(0xa2));
        // A message without a bridge withdrawal in another transaction.
        chain.push_event(3, L2_TO_L1_MESSAGE_PASSER, &passed(0xa3));

        let bridge = L2StandardBridge::new(L2_STANDARD_BRIDGE, Some(L2_TO_L1_MESSAGE_PASSER));
        let withdrawals = bridge.withdrawals_by_block_range(&chain, 1, 4).await.unwrap();

        assert_eq!(withdrawals.len(), 1);
        let block = &withdrawals[&chain.header(2).hash];
        assert_eq!(block[0].withdrawal_hash, Some(B256::repeat_byte(0xa1)));
        assert_eq!(block[1].withdrawal_hash, Some(B256::repeat_byte(0xa2)));
        assert_eq!(block[1].amount, U256::from(2));
    }

    #[tokio::test]
    async fn test_legacy_withdrawals_have_no_hash() {
        let chain = MockChain::new(10, 1, 3);
        chain.push_event(1, L2_STANDARD_BRIDGE, &initiated(7));

        let bridge = L2StandardBridge::new(L2_STANDARD_BRIDGE, None);
        let withdrawals = bridge.withdrawals_by_block_range(&chain, 0, 2).await.unwrap();
        let withdrawal = &withdrawals[&chain.header(1).hash][0];
        assert_eq!(withdrawal.withdrawal_hash, None);
        assert_eq!(withdrawal.to, Address::repeat_byte(0x0b));
    }
}

//! L1 deposit bridges.

use super::{DepositsMap, LogMeta, fetch_events, group_by_block};
use crate::{ChainClient, ReaderError};
use alloy_primitives::Address;
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use boba_indexer_bindings::{
    BridgeEvent, LEGACY_L2_ETH,
    abi::IL1StandardBridge::{ERC20DepositInitiated, ETHDepositInitiated},
};
use boba_indexer_db::Deposit;
use std::fmt::Debug;
use uuid::Uuid;

/// An L1 bridge contract that deposits are initiated on.
#[async_trait]
pub trait L1Bridge: Debug + Send + Sync {
    /// Name of the bridge, used in logs.
    fn name(&self) -> &str;

    /// The bridge contract address.
    fn address(&self) -> Address;

    /// Returns the deposits initiated on the bridge in `start..=end`.
    async fn deposits_by_block_range(
        &self,
        client: &dyn ChainClient,
        start: u64,
        end: u64,
    ) -> Result<DepositsMap, ReaderError>;
}

/// A bridge emitting `ERC20DepositInitiated`. Custom bridges reuse it under their own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardBridge {
    name: String,
    address: Address,
}

impl StandardBridge {
    /// Creates a reader for the bridge at `address`.
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self { name: name.into(), address }
    }
}

#[async_trait]
impl L1Bridge for StandardBridge {
    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Address {
        self.address
    }

    async fn deposits_by_block_range(
        &self,
        client: &dyn ChainClient,
        start: u64,
        end: u64,
    ) -> Result<DepositsMap, ReaderError> {
        let signatures = vec![ERC20DepositInitiated::SIGNATURE_HASH];
        let events = fetch_events(client, self.address, signatures, start, end).await?;

        let deposits = events.into_iter().filter_map(|(meta, event)| match event {
            BridgeEvent::Erc20DepositInitiated(event) => Some((meta, erc20_deposit(&meta, event))),
            _ => None,
        });
        Ok(group_by_block(deposits))
    }
}

fn erc20_deposit(meta: &LogMeta, event: ERC20DepositInitiated) -> Deposit {
    Deposit {
        guid: Uuid::new_v4(),
        tx_hash: meta.tx_hash,
        l1_token: event.l1Token,
        l2_token: event.l2Token,
        from: event.from,
        to: event.to,
        amount: event.amount,
        data: event.extraData,
        log_index: meta.log_index,
    }
}

/// The bridge emitting `ETHDepositInitiated`.
///
/// ETH deposits are recorded with the zero address as L1 token and the legacy ETH predeploy as
/// L2 token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthBridge {
    address: Address,
}

impl EthBridge {
    /// Creates a reader for the bridge at `address`.
    pub const fn new(address: Address) -> Self {
        Self { address }
    }
}

#[async_trait]
impl L1Bridge for EthBridge {
    fn name(&self) -> &str {
        "ETH"
    }

    fn address(&self) -> Address {
        self.address
    }

    async fn deposits_by_block_range(
        &self,
        client: &dyn ChainClient,
        start: u64,
        end: u64,
    ) -> Result<DepositsMap, ReaderError> {
        let signatures = vec![ETHDepositInitiated::SIGNATURE_HASH];
        let events = fetch_events(client, self.address, signatures, start, end).await?;

        let deposits = events.into_iter().filter_map(|(meta, event)| match event {
            BridgeEvent::EthDepositInitiated(event) => Some((
                meta,
                Deposit {
                    guid: Uuid::new_v4(),
                    tx_hash: meta.tx_hash,
                    l1_token: Address::ZERO,
                    l2_token: LEGACY_L2_ETH,
                    from: event.from,
                    to: event.to,
                    amount: event.amount,
                    data: event.extraData,
                    log_index: meta.log_index,
                },
            )),
            _ => None,
        });
        Ok(group_by_block(deposits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockChain;
    use alloy_primitives::{B256, Bytes, U256};

    fn erc20(amount: u64) -> ERC20DepositInitiated {
        ERC20DepositInitiated {
            l1Token: Address::repeat_byte(0x71),
            l2Token: Address::repeat_byte(0x72),
            from: Address::repeat_byte(0x0a),
            to: Address::repeat_byte(0x0a),
            amount: U256::from(amount),
            extraData: Bytes::new(),
        }
    }

    #[tokio::test]
    async fn test_standard_bridge_deposits() {
        let chain = MockChain::new(1, 0, 5);
        let address = Address::repeat_byte(0x10);
        let tx = chain.push_event(1, address, &erc20(10));
        chain.push_event(3, address, &erc20(20));
        chain.push_event(3, address, &erc20(30));
        // ETH deposits on the same contract are not ERC-20 deposits.
        chain.push_event(
            3,
            address,
            &ETHDepositInitiated {
                from: Address::ZERO,
                to: Address::ZERO,
                amount: U256::from(1),
                extraData: Bytes::new(),
            },
        );

        let bridge = StandardBridge::new("Standard", address);
        let deposits = bridge.deposits_by_block_range(&chain, 0, 4).await.unwrap();

        let block1 = &deposits[&chain.header(1).hash];
        assert_eq!(block1.len(), 1);
        assert_eq!(block1[0].tx_hash, tx);
        assert_eq!(block1[0].amount, U256::from(10));
        assert_eq!(block1[0].l1_token, Address::repeat_byte(0x71));

        let block3 = &deposits[&chain.header(3).hash];
        assert_eq!(
            block3.iter().map(|d| d.amount).collect::<Vec<_>>(),
            vec![U256::from(20u64), U256::from(30u64)]
        );
        assert_ne!(block3[0].guid, block3[1].guid);
    }

    #[tokio::test]
    async fn test_eth_bridge_maps_tokens() {
        let chain = MockChain::new(1, 0, 3);
        let address = Address::repeat_byte(0x10);
        chain.push_event(
            2,
            address,
            &ETHDepositInitiated {
                from: Address::repeat_byte(1),
                to: Address::repeat_byte(2),
                amount: U256::from(5),
                extraData: Bytes::from_static(b"x"),
            },
        );

        let deposits = EthBridge::new(address).deposits_by_block_range(&chain, 0, 2).await.unwrap();
        let deposit = &deposits[&chain.header(2).hash][0];
        assert_eq!(deposit.l1_token, Address::ZERO);
        assert_eq!(deposit.l2_token, LEGACY_L2_ETH);
        assert_eq!(deposit.data, Bytes::from_static(b"x"));
        assert!(!deposits.contains_key(&B256::ZERO));
    }
}

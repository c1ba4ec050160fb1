//! Domain types written to the store.

use alloy_primitives::{Address, B256, Bytes, U256};
use boba_indexer_bindings::LEGACY_L2_ETH;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A `(number, hash)` pair identifying a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockLocator {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
}

/// The subset of a block header the indexer persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    /// The block hash.
    pub hash: B256,
    /// The parent block hash.
    pub parent_hash: B256,
    /// The block number.
    pub number: u64,
    /// The block timestamp, in seconds.
    pub timestamp: u64,
}

impl BlockHeader {
    /// Returns the locator of this header.
    pub const fn locator(&self) -> BlockLocator {
        BlockLocator { number: self.number, hash: self.hash }
    }
}

/// A deposit initiated on an L1 bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    /// Unique identifier assigned when the event is read.
    pub guid: Uuid,
    /// Hash of the emitting transaction.
    pub tx_hash: B256,
    /// The L1 token. Zero for ETH.
    pub l1_token: Address,
    /// The L2 counterpart token.
    pub l2_token: Address,
    /// The depositor.
    pub from: Address,
    /// The L2 recipient.
    pub to: Address,
    /// The deposited amount, in base units.
    pub amount: U256,
    /// Opaque extra data forwarded by the bridge.
    pub data: Bytes,
    /// Log index of the event within its block.
    pub log_index: u64,
}

/// A withdrawal initiated on the L2 bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    /// Unique identifier assigned when the event is read.
    pub guid: Uuid,
    /// Hash of the emitting transaction.
    pub tx_hash: B256,
    /// The L1 counterpart token.
    pub l1_token: Address,
    /// The L2 token.
    pub l2_token: Address,
    /// The withdrawer.
    pub from: Address,
    /// The L1 recipient.
    pub to: Address,
    /// The withdrawn amount, in base units.
    pub amount: U256,
    /// Opaque extra data forwarded by the bridge.
    pub data: Bytes,
    /// Log index of the event within its block.
    pub log_index: u64,
    /// Hash of the message-passer withdrawal, only known after the Bedrock upgrade.
    pub withdrawal_hash: Option<B256>,
}

/// A withdrawal proven on the L1 portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvenWithdrawal {
    /// The proven withdrawal.
    pub withdrawal_hash: B256,
    /// Hash of the proving transaction.
    pub tx_hash: B256,
    /// Log index of the event within its block.
    pub log_index: u64,
}

/// A withdrawal finalized on the L1 portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizedWithdrawal {
    /// The finalized withdrawal.
    pub withdrawal_hash: B256,
    /// Hash of the finalizing transaction.
    pub tx_hash: B256,
    /// Log index of the event within its block.
    pub log_index: u64,
    /// Whether the withdrawal call succeeded.
    pub success: bool,
}

/// A state batch appended to the legacy state commitment chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateBatch {
    /// The batch index.
    pub index: u64,
    /// The merkle root of the batch.
    pub root: B256,
    /// Number of L2 state roots in the batch.
    pub size: u64,
    /// Number of L2 state roots committed before this batch.
    pub prev_total: u64,
    /// Opaque extra data.
    pub extra_data: Bytes,
    /// The L1 block containing the append.
    pub block_hash: B256,
}

impl StateBatch {
    /// Number of L2 state roots committed up to and including this batch.
    pub const fn total_elements(&self) -> u64 {
        self.prev_total.saturating_add(self.size)
    }
}

/// ERC-20 metadata of a bridged token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The token address.
    pub address: Address,
    /// The token name.
    pub name: String,
    /// The token symbol.
    pub symbol: String,
    /// The token decimals.
    pub decimals: u8,
}

impl Token {
    /// A token whose metadata could not be read: address only, empty name and symbol, no
    /// decimals.
    pub const fn stub(address: Address) -> Self {
        Self { address, name: String::new(), symbol: String::new(), decimals: 0 }
    }

    /// Native ether under the given address.
    pub fn ether(address: Address) -> Self {
        Self { address, name: "Ethereum".to_string(), symbol: "ETH".to_string(), decimals: 18 }
    }

    /// The tokens seeded in the L1 token table.
    pub fn l1_seeds() -> Vec<Self> {
        vec![Self::ether(Address::ZERO)]
    }

    /// The tokens seeded in the L2 token table.
    pub fn l2_seeds() -> Vec<Self> {
        vec![Self::ether(Address::ZERO), Self::ether(LEGACY_L2_ETH)]
    }
}

/// An L1 block together with the bridge events it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedL1Block {
    /// The block header.
    pub header: BlockHeader,
    /// Deposits initiated in the block.
    pub deposits: Vec<Deposit>,
    /// Withdrawals proven in the block.
    pub proven_withdrawals: Vec<ProvenWithdrawal>,
    /// Withdrawals finalized in the block.
    pub finalized_withdrawals: Vec<FinalizedWithdrawal>,
    /// State batches appended in the block.
    pub state_batches: Vec<StateBatch>,
}

impl IndexedL1Block {
    /// A block without bridge events.
    pub const fn empty(header: BlockHeader) -> Self {
        Self {
            header,
            deposits: Vec::new(),
            proven_withdrawals: Vec::new(),
            finalized_withdrawals: Vec::new(),
            state_batches: Vec::new(),
        }
    }

    /// Returns `true` if the block carries no bridge events.
    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty() &&
            self.proven_withdrawals.is_empty() &&
            self.finalized_withdrawals.is_empty() &&
            self.state_batches.is_empty()
    }
}

/// An L2 block together with the withdrawals it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedL2Block {
    /// The block header.
    pub header: BlockHeader,
    /// Withdrawals initiated in the block.
    pub withdrawals: Vec<Withdrawal>,
}

impl IndexedL2Block {
    /// A block without withdrawals.
    pub const fn empty(header: BlockHeader) -> Self {
        Self { header, withdrawals: Vec::new() }
    }
}

/// Airdrop allocation of an address, loaded into the store out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Airdrop {
    /// The lowercase recipient address.
    pub address: String,
    /// Governance voter allocation.
    pub voter_amount: String,
    /// Multisig signer allocation.
    pub multisig_signer_amount: String,
    /// Gitcoin donor allocation.
    pub gitcoin_amount: String,
    /// Active bridger allocation.
    pub active_bridged_amount: String,
    /// Network user allocation.
    pub op_user_amount: String,
    /// Repeat network user allocation.
    pub op_repeat_user_amount: String,
    /// Bonus allocation.
    pub bonus_amount: String,
    /// Sum of all allocations.
    pub total_amount: String,
}

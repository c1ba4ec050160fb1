//! Read models returned by the address-keyed queries.

use crate::Token;
use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Requested page of an address-keyed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParam {
    /// Maximum number of items.
    pub limit: u64,
    /// Number of items to skip.
    pub offset: u64,
}

impl PaginationParam {
    /// Page size used when the caller does not pass one.
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Creates a page request, falling back to the default page size for a zero limit.
    pub const fn new(limit: u64, offset: u64) -> Self {
        let limit = if limit == 0 { Self::DEFAULT_LIMIT } else { limit };
        Self { limit, offset }
    }
}

impl Default for PaginationParam {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}

/// Pagination metadata of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// The applied page size.
    pub limit: u64,
    /// The applied offset.
    pub offset: u64,
    /// Total number of matching items, ignoring the page.
    pub total: u64,
}

/// One page of an address-keyed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginated<T> {
    /// Page metadata.
    pub pagination: Pagination,
    /// The items of the page, ordered by block timestamp.
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    /// Builds a page from its items and the total count.
    pub const fn new(param: PaginationParam, total: u64, items: Vec<T>) -> Self {
        Self { pagination: Pagination { limit: param.limit, offset: param.offset, total }, items }
    }
}

/// Withdrawal filter on finalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FinalizationState {
    /// All withdrawals.
    #[default]
    Any,
    /// Only withdrawals finalized on L1.
    Finalized,
    /// Only withdrawals not yet finalized on L1.
    Unfinalized,
}

impl FinalizationState {
    /// Maps the optional `finalized` query flag.
    pub const fn from_flag(finalized: Option<bool>) -> Self {
        match finalized {
            None => Self::Any,
            Some(true) => Self::Finalized,
            Some(false) => Self::Unfinalized,
        }
    }

    /// Returns `true` if a withdrawal with the given finalization matches the filter.
    pub const fn matches(&self, finalized: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Finalized => finalized,
            Self::Unfinalized => !finalized,
        }
    }
}

/// A deposit joined with its block and L1 token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    /// Unique identifier.
    pub guid: Uuid,
    /// The depositor.
    pub from: Address,
    /// The L2 recipient.
    pub to: Address,
    /// Metadata of the L1 token.
    #[serde(rename = "l1token")]
    pub l1_token: Token,
    /// The L2 token address.
    #[serde(rename = "l2token")]
    pub l2_token: Address,
    /// The amount, as a decimal string.
    #[serde(serialize_with = "serialize_decimal")]
    pub amount: U256,
    /// Extra data.
    pub data: Bytes,
    /// Log index within the block.
    pub log_index: u64,
    /// The L1 block number.
    pub block_number: u64,
    /// The L1 block timestamp.
    pub block_timestamp: u64,
    /// Hash of the emitting transaction.
    #[serde(rename = "transactionHash")]
    pub tx_hash: B256,
}

/// A withdrawal joined with its block, L2 token and L1 lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRecord {
    /// Unique identifier.
    pub guid: Uuid,
    /// The withdrawer.
    pub from: Address,
    /// The L1 recipient.
    pub to: Address,
    /// The L1 token address.
    #[serde(rename = "l1token")]
    pub l1_token: Address,
    /// Metadata of the L2 token.
    #[serde(rename = "l2token")]
    pub l2_token: Token,
    /// The amount, as a decimal string.
    #[serde(serialize_with = "serialize_decimal")]
    pub amount: U256,
    /// Extra data.
    pub data: Bytes,
    /// Log index within the block.
    pub log_index: u64,
    /// The L2 block number.
    pub block_number: u64,
    /// The L2 block timestamp.
    pub block_timestamp: u64,
    /// Hash of the emitting transaction.
    #[serde(rename = "transactionHash")]
    pub tx_hash: B256,
    /// The message-passer withdrawal hash, if known.
    pub withdrawal_hash: Option<B256>,
    /// Hash of the L1 transaction proving the withdrawal.
    pub proven_tx_hash: Option<B256>,
    /// Log index of the proof event.
    pub proven_log_index: Option<u64>,
    /// Hash of the L1 transaction finalizing the withdrawal.
    pub finalized_tx_hash: Option<B256>,
    /// Log index of the finalization event.
    pub finalized_log_index: Option<u64>,
    /// Whether finalization succeeded.
    pub finalized_success: Option<bool>,
    /// The legacy state batch covering the withdrawal's L2 block.
    pub batch: Option<StateBatchRecord>,
}

impl WithdrawalRecord {
    /// Returns `true` if the withdrawal has been finalized on L1.
    pub const fn is_finalized(&self) -> bool {
        self.finalized_tx_hash.is_some()
    }
}

/// A state batch joined with its L1 block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBatchRecord {
    /// The batch index.
    pub index: u64,
    /// The batch root.
    pub root: B256,
    /// Number of state roots in the batch.
    pub size: u64,
    /// Number of state roots committed before the batch.
    pub prev_total: u64,
    /// Extra data.
    pub extra_data: Bytes,
    /// Hash of the L1 block containing the append.
    pub block_hash: B256,
    /// Number of the L1 block containing the append.
    pub block_number: u64,
    /// Timestamp of the L1 block containing the append.
    pub block_timestamp: u64,
}

fn serialize_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

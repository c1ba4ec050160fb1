//! Raw rows of the read queries and their conversion into records.

use crate::{
    BlockHeader, DepositRecord, StateBatchRecord, StoreError, Token, WithdrawalRecord,
    codec::{parse_address, parse_amount, parse_hash, to_u8, to_u64},
};
use alloy_primitives::Bytes;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub(super) struct BlockRow {
    hash: String,
    parent_hash: String,
    number: i64,
    timestamp: i64,
}

impl TryFrom<BlockRow> for BlockHeader {
    type Error = StoreError;

    fn try_from(row: BlockRow) -> Result<Self, Self::Error> {
        Ok(Self {
            hash: parse_hash("hash", &row.hash)?,
            parent_hash: parse_hash("parent_hash", &row.parent_hash)?,
            number: to_u64("number", row.number)?,
            timestamp: to_u64("timestamp", row.timestamp)?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct TokenRow {
    address: String,
    name: String,
    symbol: String,
    decimals: i32,
}

impl TryFrom<TokenRow> for Token {
    type Error = StoreError;

    fn try_from(row: TokenRow) -> Result<Self, Self::Error> {
        Ok(Self {
            address: parse_address("address", &row.address)?,
            name: row.name,
            symbol: row.symbol,
            decimals: to_u8("decimals", row.decimals)?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct DepositRow {
    guid: Uuid,
    from_address: String,
    to_address: String,
    l1_token: String,
    l1_token_name: String,
    l1_token_symbol: String,
    l1_token_decimals: i32,
    l2_token: String,
    amount: String,
    data: Vec<u8>,
    log_index: i64,
    block_number: i64,
    block_timestamp: i64,
    tx_hash: String,
}

impl TryFrom<DepositRow> for DepositRecord {
    type Error = StoreError;

    fn try_from(row: DepositRow) -> Result<Self, Self::Error> {
        Ok(Self {
            guid: row.guid,
            from: parse_address("from_address", &row.from_address)?,
            to: parse_address("to_address", &row.to_address)?,
            l1_token: Token {
                address: parse_address("l1_token", &row.l1_token)?,
                name: row.l1_token_name,
                symbol: row.l1_token_symbol,
                decimals: to_u8("decimals", row.l1_token_decimals)?,
            },
            l2_token: parse_address("l2_token", &row.l2_token)?,
            amount: parse_amount("amount", &row.amount)?,
            data: Bytes::from(row.data),
            log_index: to_u64("log_index", row.log_index)?,
            block_number: to_u64("number", row.block_number)?,
            block_timestamp: to_u64("timestamp", row.block_timestamp)?,
            tx_hash: parse_hash("tx_hash", &row.tx_hash)?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct WithdrawalRow {
    guid: Uuid,
    from_address: String,
    to_address: String,
    l1_token: String,
    l2_token: String,
    l2_token_name: String,
    l2_token_symbol: String,
    l2_token_decimals: i32,
    amount: String,
    data: Vec<u8>,
    log_index: i64,
    block_number: i64,
    block_timestamp: i64,
    tx_hash: String,
    withdrawal_hash: Option<String>,
    proven_tx_hash: Option<String>,
    proven_log_index: Option<i64>,
    finalized_tx_hash: Option<String>,
    finalized_log_index: Option<i64>,
    finalized_success: Option<bool>,
}

impl TryFrom<WithdrawalRow> for WithdrawalRecord {
    type Error = StoreError;

    fn try_from(row: WithdrawalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            guid: row.guid,
            from: parse_address("from_address", &row.from_address)?,
            to: parse_address("to_address", &row.to_address)?,
            l1_token: parse_address("l1_token", &row.l1_token)?,
            l2_token: Token {
                address: parse_address("l2_token", &row.l2_token)?,
                name: row.l2_token_name,
                symbol: row.l2_token_symbol,
                decimals: to_u8("decimals", row.l2_token_decimals)?,
            },
            amount: parse_amount("amount", &row.amount)?,
            data: Bytes::from(row.data),
            log_index: to_u64("log_index", row.log_index)?,
            block_number: to_u64("number", row.block_number)?,
            block_timestamp: to_u64("timestamp", row.block_timestamp)?,
            tx_hash: parse_hash("tx_hash", &row.tx_hash)?,
            withdrawal_hash: row
                .withdrawal_hash
                .map(|h| parse_hash("withdrawal_hash", &h))
                .transpose()?,
            proven_tx_hash: row.proven_tx_hash.map(|h| parse_hash("proven_tx_hash", &h)).transpose()?,
            proven_log_index: row
                .proven_log_index
                .map(|i| to_u64("proven_log_index", i))
                .transpose()?,
            finalized_tx_hash: row
                .finalized_tx_hash
                .map(|h| parse_hash("finalized_tx_hash", &h))
                .transpose()?,
            finalized_log_index: row
                .finalized_log_index
                .map(|i| to_u64("finalized_log_index", i))
                .transpose()?,
            finalized_success: row.finalized_success,
            batch: None,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct StateBatchRow {
    index: i64,
    root: String,
    size: i64,
    prev_total: i64,
    extra_data: Vec<u8>,
    block_hash: String,
    block_number: i64,
    block_timestamp: i64,
}

impl TryFrom<StateBatchRow> for StateBatchRecord {
    type Error = StoreError;

    fn try_from(row: StateBatchRow) -> Result<Self, Self::Error> {
        Ok(Self {
            index: to_u64("index", row.index)?,
            root: parse_hash("root", &row.root)?,
            size: to_u64("size", row.size)?,
            prev_total: to_u64("prev_total", row.prev_total)?,
            extra_data: Bytes::from(row.extra_data),
            block_hash: parse_hash("block_hash", &row.block_hash)?,
            block_number: to_u64("number", row.block_number)?,
            block_timestamp: to_u64("timestamp", row.block_timestamp)?,
        })
    }
}

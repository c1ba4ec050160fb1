//! Column encodings shared by the store implementations.
//!
//! Addresses and hashes are stored as lowercase `0x`-prefixed hex, amounts as decimal text
//! and unsigned integers as `BIGINT`.

use crate::StoreError;
use alloy_primitives::{Address, B256, U256};
use std::str::FromStr;

pub(crate) fn address_column(address: &Address) -> String {
    format!("{address:#x}")
}

pub(crate) fn hash_column(hash: &B256) -> String {
    format!("{hash:#x}")
}

pub(crate) fn parse_address(column: &'static str, value: &str) -> Result<Address, StoreError> {
    Address::from_str(value).map_err(|_| StoreError::Corrupt { column, value: value.to_string() })
}

pub(crate) fn parse_hash(column: &'static str, value: &str) -> Result<B256, StoreError> {
    B256::from_str(value).map_err(|_| StoreError::Corrupt { column, value: value.to_string() })
}

pub(crate) fn parse_amount(column: &'static str, value: &str) -> Result<U256, StoreError> {
    U256::from_str_radix(value, 10)
        .map_err(|_| StoreError::Corrupt { column, value: value.to_string() })
}

pub(crate) fn to_i64(column: &'static str, value: u64) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::OutOfRange(column))
}

pub(crate) fn to_u64(column: &'static str, value: i64) -> Result<u64, StoreError> {
    u64::try_from(value).map_err(|_| StoreError::Corrupt { column, value: value.to_string() })
}

pub(crate) fn to_u8(column: &'static str, value: i32) -> Result<u8, StoreError> {
    u8::try_from(value).map_err(|_| StoreError::Corrupt { column, value: value.to_string() })
}

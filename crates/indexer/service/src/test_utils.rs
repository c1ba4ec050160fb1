//! Test utilities for the chain indexers.

use crate::{ChainClient, ClientError};
use alloy_primitives::{Address, B256, keccak256};
use alloy_rpc_types_eth::{Filter, Log};
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use boba_indexer_db::{BlockHeader, Token};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::Duration,
};

/// Timestamp of block zero of every [`MockChain`].
pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

#[derive(Debug, Default)]
struct ChainState {
    headers: Vec<BlockHeader>,
    logs: Vec<Log>,
    tokens: HashMap<Address, Token>,
    header_batches: Vec<(u64, u64)>,
    failing_log_requests: usize,
    next_tx: u64,
    fork: u64,
}

/// A scripted in-memory chain implementing [`ChainClient`].
///
/// Block hashes are derived from the seed, the fork counter and the block number, so two chains
/// with different seeds never share a block.
#[derive(Debug)]
pub struct MockChain {
    chain_id: u64,
    seed: u64,
    state: Mutex<ChainState>,
}

impl MockChain {
    /// Creates a chain of `length` blocks, numbered from zero.
    pub fn new(chain_id: u64, seed: u64, length: u64) -> Self {
        let chain = Self { chain_id, seed, state: Mutex::default() };
        chain.extend(length);
        chain
    }

    fn lock(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn block_hash(&self, fork: u64, number: u64) -> B256 {
        let mut preimage = [0u8; 24];
        preimage[..8].copy_from_slice(&self.seed.to_be_bytes());
        preimage[8..16].copy_from_slice(&fork.to_be_bytes());
        preimage[16..].copy_from_slice(&number.to_be_bytes());
        keccak256(preimage)
    }

    /// Appends `count` blocks.
    pub fn extend(&self, count: u64) {
        let mut state = self.lock();
        for _ in 0..count {
            let number = state.headers.len() as u64;
            let parent_hash = state.headers.last().map(|h| h.hash).unwrap_or_default();
            let hash = self.block_hash(state.fork, number);
            state.headers.push(BlockHeader {
                hash,
                parent_hash,
                number,
                timestamp: GENESIS_TIMESTAMP + number * 12,
            });
        }
    }

    /// Replaces every block from `number` on with a block of a new fork, dropping their logs.
    pub fn reorg_from(&self, number: u64) {
        let length = {
            let mut state = self.lock();
            let length = state.headers.len() as u64;
            state.headers.truncate(number as usize);
            state.logs.retain(|log| log.block_number.is_some_and(|n| n < number));
            state.fork += 1;
            length
        };
        self.extend(length.saturating_sub(number));
    }

    /// The latest header.
    ///
    /// # Panics
    /// If the chain is empty.
    pub fn head(&self) -> BlockHeader {
        *self.lock().headers.last().expect("empty mock chain")
    }

    /// The header at `number`.
    ///
    /// # Panics
    /// If the chain is shorter than `number`.
    pub fn header(&self, number: u64) -> BlockHeader {
        self.lock().headers[number as usize]
    }

    /// Emits `event` from `address` in block `number`, in a transaction of its own. Returns the
    /// transaction hash.
    pub fn push_event<E: SolEvent>(&self, number: u64, address: Address, event: &E) -> B256 {
        let tx_hash = {
            let mut state = self.lock();
            state.next_tx += 1;
            keccak256([self.seed.to_be_bytes(), state.next_tx.to_be_bytes()].concat())
        };
        self.push_event_in_tx(number, tx_hash, address, event);
        tx_hash
    }

    /// Emits `event` from `address` in block `number` as part of transaction `tx_hash`. Returns
    /// the log index.
    pub fn push_event_in_tx<E: SolEvent>(
        &self,
        number: u64,
        tx_hash: B256,
        address: Address,
        event: &E,
    ) -> u64 {
        let mut state = self.lock();
        let header = state.headers[number as usize];
        let log_index =
            state.logs.iter().filter(|log| log.block_number == Some(number)).count() as u64;
        state.logs.push(Log {
            inner: alloy_primitives::Log { address, data: event.encode_log_data() },
            block_hash: Some(header.hash),
            block_number: Some(number),
            block_timestamp: Some(header.timestamp),
            transaction_hash: Some(tx_hash),
            transaction_index: Some(0),
            log_index: Some(log_index),
            removed: false,
        });
        log_index
    }

    /// Makes `token` readable through [`ChainClient::erc20_metadata`].
    pub fn set_token(&self, token: Token) {
        self.lock().tokens.insert(token.address, token);
    }

    /// Makes the next `count` log requests time out.
    pub fn fail_log_requests(&self, count: usize) {
        self.lock().failing_log_requests = count;
    }

    /// The `(start, end)` ranges requested through [`ChainClient::headers_by_range`].
    pub fn header_batches(&self) -> Vec<(u64, u64)> {
        self.lock().header_batches.clone()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn chain_id(&self) -> Result<u64, ClientError> {
        Ok(self.chain_id)
    }

    async fn latest_header(&self) -> Result<BlockHeader, ClientError> {
        self.lock()
            .headers
            .last()
            .copied()
            .ok_or(ClientError::BlockNotFound(alloy_eips::BlockNumberOrTag::Latest))
    }

    async fn header_by_number(&self, number: u64) -> Result<Option<BlockHeader>, ClientError> {
        Ok(self.lock().headers.get(number as usize).copied())
    }

    async fn headers_by_range(
        &self,
        start: u64,
        end: u64,
    ) -> Result<Vec<Option<BlockHeader>>, ClientError> {
        let mut state = self.lock();
        state.header_batches.push((start, end));
        Ok((start..=end).map(|n| state.headers.get(n as usize).copied()).collect())
    }

    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, ClientError> {
        let mut state = self.lock();
        if state.failing_log_requests > 0 {
            state.failing_log_requests -= 1;
            return Err(ClientError::Timeout(Duration::from_secs(30)));
        }

        let from = filter.get_from_block().unwrap_or_default();
        let to = filter.get_to_block().unwrap_or(u64::MAX);
        Ok(state
            .logs
            .iter()
            .filter(|log| log.block_number.is_some_and(|n| n >= from && n <= to))
            .filter(|log| filter.matches_address(log.address()))
            .filter(|log| filter.matches_topics(log.topics()))
            .cloned()
            .collect())
    }

    async fn erc20_metadata(&self, token: Address) -> Result<Token, ClientError> {
        self.lock()
            .tokens
            .get(&token)
            .cloned()
            .ok_or(ClientError::CallDecode {
                call: "name()",
                source: alloy_sol_types::Error::Overrun,
            })
    }
}

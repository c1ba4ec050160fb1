//! Store interfaces.

use crate::{
    Airdrop, BlockHeader, BlockLocator, DepositRecord, FinalizationState, IndexedL1Block,
    IndexedL2Block, Paginated, PaginationParam, StateBatch, StateBatchRecord, StoreError, Token,
    WithdrawalRecord,
};
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use std::fmt::Debug;

/// Write half of the bridge store, driven by the chain indexers.
///
/// Every method commits atomically: on error nothing of the call is visible.
#[async_trait]
pub trait BridgeStoreWriter: Debug + Send + Sync {
    /// Persists an L1 block with its deposits, proven and finalized withdrawals and state
    /// batches.
    ///
    /// Proofs and finalizations update the withdrawal with the matching hash. Unknown hashes
    /// and withdrawals already carrying the field are skipped.
    ///
    /// # Errors
    /// [`StoreError::Integrity`] if the block hash or number is already stored, a deposit
    /// references an unknown L1 token, or a state batch breaks the batch chain.
    async fn add_indexed_l1_block(&self, block: &IndexedL1Block) -> Result<(), StoreError>;

    /// Persists an L2 block with its withdrawals.
    ///
    /// # Errors
    /// [`StoreError::Integrity`] if the block hash or number is already stored or a
    /// withdrawal references an unknown L2 token.
    async fn add_indexed_l2_block(&self, block: &IndexedL2Block) -> Result<(), StoreError>;

    /// Persists state batches whose L1 blocks are already stored.
    ///
    /// Batches must continue the stored batch chain: each batch's `prev_total` equals the
    /// previous batch's `prev_total + size`.
    async fn add_state_batches(&self, batches: &[StateBatch]) -> Result<(), StoreError>;

    /// Records L1 token metadata. Re-adding identical metadata is a no-op.
    ///
    /// # Errors
    /// [`StoreError::Integrity`] if different metadata is already stored for the address.
    async fn add_l1_token(&self, token: &Token) -> Result<(), StoreError>;

    /// Records L2 token metadata. Re-adding identical metadata is a no-op.
    async fn add_l2_token(&self, token: &Token) -> Result<(), StoreError>;
}

/// Read half of the bridge store, used by the indexers to resume and by the HTTP API.
#[async_trait]
pub trait BridgeStoreReader: Debug + Send + Sync {
    /// Returns the metadata of an L1 token.
    async fn get_l1_token_by_address(&self, address: Address)
    -> Result<Option<Token>, StoreError>;

    /// Returns the metadata of an L2 token.
    async fn get_l2_token_by_address(&self, address: Address)
    -> Result<Option<Token>, StoreError>;

    /// Returns the highest stored L1 block.
    async fn get_highest_l1_block(&self) -> Result<Option<BlockLocator>, StoreError>;

    /// Returns the highest stored L2 block.
    async fn get_highest_l2_block(&self) -> Result<Option<BlockLocator>, StoreError>;

    /// Returns a stored L1 block by hash.
    async fn get_indexed_l1_block_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<BlockHeader>, StoreError>;

    /// Returns a page of the deposits sent from `address`, oldest first.
    async fn get_deposits_by_address(
        &self,
        address: Address,
        page: PaginationParam,
    ) -> Result<Paginated<DepositRecord>, StoreError>;

    /// Returns a page of the withdrawals sent from `address` matching `state`, oldest first.
    ///
    /// The `batch` field of the returned records is not populated.
    async fn get_withdrawals_by_address(
        &self,
        address: Address,
        page: PaginationParam,
        state: FinalizationState,
    ) -> Result<Paginated<WithdrawalRecord>, StoreError>;

    /// Returns the lowest-indexed state batch covering the L2 block of the withdrawal emitted
    /// by `tx_hash`.
    async fn get_withdrawal_batch(
        &self,
        tx_hash: B256,
    ) -> Result<Option<StateBatchRecord>, StoreError>;

    /// Returns the airdrop allocation of `address`.
    async fn get_airdrop(&self, address: Address) -> Result<Option<Airdrop>, StoreError>;
}

/// A store supporting both halves.
pub trait BridgeStore: BridgeStoreReader + BridgeStoreWriter {}

impl<T: BridgeStoreReader + BridgeStoreWriter> BridgeStore for T {}

//! In-process bridge store for tests.

use crate::{
    Airdrop, BlockHeader, BlockLocator, BridgeStoreReader, BridgeStoreWriter, Deposit,
    DepositRecord, FinalizationState, IndexedL1Block, IndexedL2Block, Paginated, PaginationParam,
    StateBatch, StateBatchRecord, StoreError, Token, Withdrawal, WithdrawalRecord,
    codec::address_column,
};
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, MutexGuard},
};

#[derive(Debug, Clone, Default)]
struct Blocks {
    by_number: BTreeMap<u64, BlockHeader>,
    by_hash: HashMap<B256, u64>,
}

impl Blocks {
    fn insert(&mut self, header: BlockHeader) -> Result<(), StoreError> {
        if self.by_hash.contains_key(&header.hash) {
            return Err(StoreError::Integrity(format!("block {} already stored", header.hash)));
        }
        if self.by_number.contains_key(&header.number) {
            return Err(StoreError::Integrity(format!(
                "block number {} already stored",
                header.number
            )));
        }
        self.by_hash.insert(header.hash, header.number);
        self.by_number.insert(header.number, header);
        Ok(())
    }

    fn get(&self, hash: &B256) -> Option<&BlockHeader> {
        self.by_hash.get(hash).and_then(|number| self.by_number.get(number))
    }

    fn highest(&self) -> Option<BlockLocator> {
        self.by_number.values().next_back().map(BlockHeader::locator)
    }
}

#[derive(Debug, Clone)]
struct StoredWithdrawal {
    block_hash: B256,
    withdrawal: Withdrawal,
    proven: Option<(B256, u64)>,
    finalized: Option<(B256, u64, bool)>,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    l1_blocks: Blocks,
    l2_blocks: Blocks,
    l1_tokens: HashMap<Address, Token>,
    l2_tokens: HashMap<Address, Token>,
    deposits: Vec<(B256, Deposit)>,
    withdrawals: Vec<StoredWithdrawal>,
    state_batches: BTreeMap<u64, StateBatch>,
    airdrops: HashMap<String, Airdrop>,
}

impl Tables {
    fn seeded() -> Self {
        let mut tables = Self::default();
        for token in Token::l1_seeds() {
            tables.l1_tokens.insert(token.address, token);
        }
        for token in Token::l2_seeds() {
            tables.l2_tokens.insert(token.address, token);
        }
        tables
    }

    fn insert_state_batches(&mut self, batches: &[StateBatch]) -> Result<(), StoreError> {
        for batch in batches {
            if self.state_batches.contains_key(&batch.index) {
                return Err(StoreError::Integrity(format!(
                    "state batch {} already stored",
                    batch.index
                )));
            }
            if self.l1_blocks.get(&batch.block_hash).is_none() {
                return Err(StoreError::Integrity(format!(
                    "state batch {} references unknown block {}",
                    batch.index, batch.block_hash
                )));
            }
            let previous = batch.index.checked_sub(1).and_then(|i| self.state_batches.get(&i));
            if let Some(previous) = previous &&
                previous.total_elements() != batch.prev_total
            {
                return Err(StoreError::Integrity(format!(
                    "state batch {} starts at {} but the previous batch ends at {}",
                    batch.index,
                    batch.prev_total,
                    previous.total_elements()
                )));
            }
            self.state_batches.insert(batch.index, batch.clone());
        }
        Ok(())
    }

    fn insert_token(
        tokens: &mut HashMap<Address, Token>,
        token: &Token,
    ) -> Result<(), StoreError> {
        match tokens.get(&token.address) {
            Some(stored) if stored == token => Ok(()),
            Some(_) => Err(StoreError::Integrity(format!(
                "token {} already stored with different metadata",
                token.address
            ))),
            None => {
                tokens.insert(token.address, token.clone());
                Ok(())
            }
        }
    }

    fn batch_record(&self, batch: &StateBatch) -> Option<StateBatchRecord> {
        let block = self.l1_blocks.get(&batch.block_hash)?;
        Some(StateBatchRecord {
            index: batch.index,
            root: batch.root,
            size: batch.size,
            prev_total: batch.prev_total,
            extra_data: batch.extra_data.clone(),
            block_hash: batch.block_hash,
            block_number: block.number,
            block_timestamp: block.timestamp,
        })
    }
}

/// A [`BridgeStoreReader`] and [`BridgeStoreWriter`] keeping every table in memory.
///
/// Enforces the same uniqueness, reference, batch-chain and write-once rules as
/// [`PgStore`](crate::PgStore), and applies each write atomically.
#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store with the native ether tokens seeded.
    pub fn new() -> Self {
        Self { tables: Mutex::new(Tables::seeded()) }
    }

    /// Loads an airdrop allocation. The address is matched case-insensitively.
    pub fn insert_airdrop(&self, mut airdrop: Airdrop) {
        airdrop.address = airdrop.address.to_lowercase();
        self.lock().airdrops.insert(airdrop.address.clone(), airdrop);
    }

    /// Returns every stored L1 block number, ascending.
    pub fn l1_block_numbers(&self) -> Vec<u64> {
        self.lock().l1_blocks.by_number.keys().copied().collect()
    }

    /// Returns every stored L2 block number, ascending.
    pub fn l2_block_numbers(&self) -> Vec<u64> {
        self.lock().l2_blocks.by_number.keys().copied().collect()
    }

    /// Returns every stored deposit in insertion order.
    pub fn deposits(&self) -> Vec<Deposit> {
        self.lock().deposits.iter().map(|(_, d)| d.clone()).collect()
    }

    /// Returns every stored withdrawal in insertion order.
    pub fn withdrawals(&self) -> Vec<Withdrawal> {
        self.lock().withdrawals.iter().map(|w| w.withdrawal.clone()).collect()
    }

    /// Returns every stored state batch, ordered by index.
    pub fn state_batches(&self) -> Vec<StateBatch> {
        self.lock().state_batches.values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs `f` against a copy of the tables and publishes the copy only on success.
    fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut tables = self.lock();
        let mut staged = tables.clone();
        let out = f(&mut staged)?;
        *tables = staged;
        Ok(out)
    }
}

#[async_trait]
impl BridgeStoreWriter for MemoryStore {
    async fn add_indexed_l1_block(&self, block: &IndexedL1Block) -> Result<(), StoreError> {
        self.transaction(|tables| {
            tables.l1_blocks.insert(block.header)?;

            for deposit in &block.deposits {
                if !tables.l1_tokens.contains_key(&deposit.l1_token) {
                    return Err(StoreError::Integrity(format!(
                        "deposit references unknown L1 token {}",
                        deposit.l1_token
                    )));
                }
                if tables
                    .deposits
                    .iter()
                    .any(|(_, d)| d.tx_hash == deposit.tx_hash && d.log_index == deposit.log_index)
                {
                    return Err(StoreError::Integrity(format!(
                        "deposit {}:{} already stored",
                        deposit.tx_hash, deposit.log_index
                    )));
                }
                tables.deposits.push((block.header.hash, deposit.clone()));
            }

            for proven in &block.proven_withdrawals {
                tables
                    .withdrawals
                    .iter_mut()
                    .filter(|w| w.withdrawal.withdrawal_hash == Some(proven.withdrawal_hash))
                    .filter(|w| w.proven.is_none())
                    .for_each(|w| w.proven = Some((proven.tx_hash, proven.log_index)));
            }

            for finalized in &block.finalized_withdrawals {
                tables
                    .withdrawals
                    .iter_mut()
                    .filter(|w| w.withdrawal.withdrawal_hash == Some(finalized.withdrawal_hash))
                    .filter(|w| w.finalized.is_none())
                    .for_each(|w| {
                        w.finalized =
                            Some((finalized.tx_hash, finalized.log_index, finalized.success))
                    });
            }

            tables.insert_state_batches(&block.state_batches)
        })
    }

    async fn add_indexed_l2_block(&self, block: &IndexedL2Block) -> Result<(), StoreError> {
        self.transaction(|tables| {
            tables.l2_blocks.insert(block.header)?;

            for withdrawal in &block.withdrawals {
                if !tables.l2_tokens.contains_key(&withdrawal.l2_token) {
                    return Err(StoreError::Integrity(format!(
                        "withdrawal references unknown L2 token {}",
                        withdrawal.l2_token
                    )));
                }
                if tables.withdrawals.iter().any(|w| {
                    w.withdrawal.tx_hash == withdrawal.tx_hash &&
                        w.withdrawal.log_index == withdrawal.log_index
                }) {
                    return Err(StoreError::Integrity(format!(
                        "withdrawal {}:{} already stored",
                        withdrawal.tx_hash, withdrawal.log_index
                    )));
                }
                tables.withdrawals.push(StoredWithdrawal {
                    block_hash: block.header.hash,
                    withdrawal: withdrawal.clone(),
                    proven: None,
                    finalized: None,
                });
            }
            Ok(())
        })
    }

    async fn add_state_batches(&self, batches: &[StateBatch]) -> Result<(), StoreError> {
        self.transaction(|tables| tables.insert_state_batches(batches))
    }

    async fn add_l1_token(&self, token: &Token) -> Result<(), StoreError> {
        self.transaction(|tables| Tables::insert_token(&mut tables.l1_tokens, token))
    }

    async fn add_l2_token(&self, token: &Token) -> Result<(), StoreError> {
        self.transaction(|tables| Tables::insert_token(&mut tables.l2_tokens, token))
    }
}

#[async_trait]
impl BridgeStoreReader for MemoryStore {
    async fn get_l1_token_by_address(
        &self,
        address: Address,
    ) -> Result<Option<Token>, StoreError> {
        Ok(self.lock().l1_tokens.get(&address).cloned())
    }

    async fn get_l2_token_by_address(
        &self,
        address: Address,
    ) -> Result<Option<Token>, StoreError> {
        Ok(self.lock().l2_tokens.get(&address).cloned())
    }

    async fn get_highest_l1_block(&self) -> Result<Option<BlockLocator>, StoreError> {
        Ok(self.lock().l1_blocks.highest())
    }

    async fn get_highest_l2_block(&self) -> Result<Option<BlockLocator>, StoreError> {
        Ok(self.lock().l2_blocks.highest())
    }

    async fn get_indexed_l1_block_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<BlockHeader>, StoreError> {
        Ok(self.lock().l1_blocks.get(&hash).copied())
    }

    async fn get_deposits_by_address(
        &self,
        address: Address,
        page: PaginationParam,
    ) -> Result<Paginated<DepositRecord>, StoreError> {
        let tables = self.lock();
        let mut matching = tables
            .deposits
            .iter()
            .filter(|(_, d)| d.from == address)
            .filter_map(|(block_hash, d)| {
                let block = tables.l1_blocks.get(block_hash)?;
                let token = tables.l1_tokens.get(&d.l1_token)?;
                Some(DepositRecord {
                    guid: d.guid,
                    from: d.from,
                    to: d.to,
                    l1_token: token.clone(),
                    l2_token: d.l2_token,
                    amount: d.amount,
                    data: d.data.clone(),
                    log_index: d.log_index,
                    block_number: block.number,
                    block_timestamp: block.timestamp,
                    tx_hash: d.tx_hash,
                })
            })
            .collect::<Vec<_>>();
        matching.sort_by_key(|r| (r.block_timestamp, r.block_number, r.log_index));

        Ok(paginate(matching, page))
    }

    async fn get_withdrawals_by_address(
        &self,
        address: Address,
        page: PaginationParam,
        state: FinalizationState,
    ) -> Result<Paginated<WithdrawalRecord>, StoreError> {
        let tables = self.lock();
        let mut matching = tables
            .withdrawals
            .iter()
            .filter(|w| w.withdrawal.from == address)
            .filter(|w| state.matches(w.finalized.is_some()))
            .filter_map(|w| {
                let block = tables.l2_blocks.get(&w.block_hash)?;
                let token = tables.l2_tokens.get(&w.withdrawal.l2_token)?;
                let inner = &w.withdrawal;
                Some(WithdrawalRecord {
                    guid: inner.guid,
                    from: inner.from,
                    to: inner.to,
                    l1_token: inner.l1_token,
                    l2_token: token.clone(),
                    amount: inner.amount,
                    data: inner.data.clone(),
                    log_index: inner.log_index,
                    block_number: block.number,
                    block_timestamp: block.timestamp,
                    tx_hash: inner.tx_hash,
                    withdrawal_hash: inner.withdrawal_hash,
                    proven_tx_hash: w.proven.map(|(hash, _)| hash),
                    proven_log_index: w.proven.map(|(_, index)| index),
                    finalized_tx_hash: w.finalized.map(|(hash, _, _)| hash),
                    finalized_log_index: w.finalized.map(|(_, index, _)| index),
                    finalized_success: w.finalized.map(|(_, _, success)| success),
                    batch: None,
                })
            })
            .collect::<Vec<_>>();
        matching.sort_by_key(|r| (r.block_timestamp, r.block_number, r.log_index));

        Ok(paginate(matching, page))
    }

    async fn get_withdrawal_batch(
        &self,
        tx_hash: B256,
    ) -> Result<Option<StateBatchRecord>, StoreError> {
        let tables = self.lock();
        let Some(number) = tables
            .withdrawals
            .iter()
            .find(|w| w.withdrawal.tx_hash == tx_hash)
            .and_then(|w| tables.l2_blocks.get(&w.block_hash))
            .map(|block| block.number)
        else {
            return Ok(None);
        };

        Ok(tables
            .state_batches
            .values()
            .find(|batch| batch.total_elements() >= number)
            .and_then(|batch| tables.batch_record(batch)))
    }

    async fn get_airdrop(&self, address: Address) -> Result<Option<Airdrop>, StoreError> {
        Ok(self.lock().airdrops.get(&address_column(&address)).cloned())
    }
}

fn paginate<T>(items: Vec<T>, page: PaginationParam) -> Paginated<T> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
        .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
        .collect();
    Paginated::new(page, total, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FinalizedWithdrawal, ProvenWithdrawal};
    use alloy_primitives::{Bytes, U256};
    use uuid::Uuid;

    fn header(number: u64, timestamp: u64) -> BlockHeader {
        BlockHeader {
            hash: B256::with_last_byte(number as u8),
            parent_hash: B256::with_last_byte(number.saturating_sub(1) as u8),
            number,
            timestamp,
        }
    }

    fn deposit(from: Address, log_index: u64) -> Deposit {
        Deposit {
            guid: Uuid::new_v4(),
            tx_hash: B256::repeat_byte(log_index as u8 + 1),
            l1_token: Address::ZERO,
            l2_token: boba_indexer_bindings::LEGACY_L2_ETH,
            from,
            to: from,
            amount: U256::from(1_000u64),
            data: Bytes::new(),
            log_index,
        }
    }

    fn withdrawal(from: Address, tx: u8, hash: Option<B256>) -> Withdrawal {
        Withdrawal {
            guid: Uuid::new_v4(),
            tx_hash: B256::repeat_byte(tx),
            l1_token: Address::ZERO,
            l2_token: boba_indexer_bindings::LEGACY_L2_ETH,
            from,
            to: from,
            amount: U256::from(7u64),
            data: Bytes::new(),
            log_index: 0,
            withdrawal_hash: hash,
        }
    }

    fn batch(index: u64, prev_total: u64, size: u64, block_hash: B256) -> StateBatch {
        StateBatch {
            index,
            root: B256::repeat_byte(index as u8),
            size,
            prev_total,
            extra_data: Bytes::new(),
            block_hash,
        }
    }

    #[tokio::test]
    async fn test_duplicate_block_is_integrity_error() {
        let store = MemoryStore::new();
        store.add_indexed_l1_block(&IndexedL1Block::empty(header(1, 10))).await.unwrap();

        let err = store.add_indexed_l1_block(&IndexedL1Block::empty(header(1, 10))).await;
        assert!(err.unwrap_err().is_integrity());

        let mut same_number = header(1, 10);
        same_number.hash = B256::repeat_byte(0xff);
        let err = store.add_indexed_l1_block(&IndexedL1Block::empty(same_number)).await;
        assert!(err.unwrap_err().is_integrity());
    }

    #[tokio::test]
    async fn test_failed_write_is_atomic() {
        let store = MemoryStore::new();
        let from = Address::repeat_byte(1);
        let mut bad = deposit(from, 1);
        bad.l1_token = Address::repeat_byte(0x99);

        let block = IndexedL1Block {
            deposits: vec![deposit(from, 0), bad],
            ..IndexedL1Block::empty(header(1, 10))
        };
        assert!(store.add_indexed_l1_block(&block).await.unwrap_err().is_integrity());
        assert!(store.l1_block_numbers().is_empty());
        assert!(store.deposits().is_empty());
    }

    #[tokio::test]
    async fn test_token_is_write_once() {
        let store = MemoryStore::new();
        let token = Token {
            address: Address::repeat_byte(2),
            name: "Boba".into(),
            symbol: "BOBA".into(),
            decimals: 18,
        };
        store.add_l1_token(&token).await.unwrap();
        store.add_l1_token(&token).await.unwrap();

        let conflicting = Token { decimals: 6, ..token.clone() };
        assert!(store.add_l1_token(&conflicting).await.unwrap_err().is_integrity());
        assert_eq!(store.get_l1_token_by_address(token.address).await.unwrap(), Some(token));
        assert_eq!(store.get_l2_token_by_address(Address::repeat_byte(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_deposits_paginate_by_timestamp() {
        let store = MemoryStore::new();
        let from = Address::repeat_byte(1);
        for (number, log_index) in [(3u64, 2u64), (1, 0), (2, 1)] {
            let block = IndexedL1Block {
                deposits: vec![deposit(from, log_index)],
                ..IndexedL1Block::empty(header(number, number * 12))
            };
            store.add_indexed_l1_block(&block).await.unwrap();
        }

        let first = store.get_deposits_by_address(from, PaginationParam::new(2, 0)).await.unwrap();
        assert_eq!(first.pagination.total, 3);
        assert_eq!(
            first.items.iter().map(|d| d.block_number).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(first.items[0].l1_token.symbol, "ETH");

        let second = store.get_deposits_by_address(from, PaginationParam::new(2, 2)).await.unwrap();
        assert_eq!(second.items.iter().map(|d| d.block_number).collect::<Vec<_>>(), vec![3]);

        let other = store
            .get_deposits_by_address(Address::repeat_byte(9), PaginationParam::default())
            .await
            .unwrap();
        assert_eq!(other.pagination.total, 0);
        assert!(other.items.is_empty());
    }

    #[tokio::test]
    async fn test_withdrawal_lifecycle() {
        let store = MemoryStore::new();
        let from = Address::repeat_byte(1);
        let hash = B256::repeat_byte(0xab);
        let l2 = IndexedL2Block {
            withdrawals: vec![withdrawal(from, 1, Some(hash)), withdrawal(from, 2, None)],
            ..IndexedL2Block::empty(header(5, 50))
        };
        store.add_indexed_l2_block(&l2).await.unwrap();

        let proven = ProvenWithdrawal { withdrawal_hash: hash, tx_hash: B256::repeat_byte(3), log_index: 4 };
        let finalized = FinalizedWithdrawal {
            withdrawal_hash: hash,
            tx_hash: B256::repeat_byte(5),
            log_index: 6,
            success: true,
        };
        let l1 = IndexedL1Block {
            proven_withdrawals: vec![proven],
            finalized_withdrawals: vec![finalized],
            ..IndexedL1Block::empty(header(1, 60))
        };
        store.add_indexed_l1_block(&l1).await.unwrap();

        // A second proof for the same withdrawal does not overwrite the first.
        let reproven = ProvenWithdrawal { tx_hash: B256::repeat_byte(9), ..proven };
        let l1 = IndexedL1Block {
            proven_withdrawals: vec![reproven],
            ..IndexedL1Block::empty(header(2, 72))
        };
        store.add_indexed_l1_block(&l1).await.unwrap();

        let page = PaginationParam::default();
        let all = store.get_withdrawals_by_address(from, page, FinalizationState::Any).await.unwrap();
        assert_eq!(all.pagination.total, 2);

        let done =
            store.get_withdrawals_by_address(from, page, FinalizationState::Finalized).await.unwrap();
        assert_eq!(done.pagination.total, 1);
        let record = &done.items[0];
        assert_eq!(record.proven_tx_hash, Some(B256::repeat_byte(3)));
        assert_eq!(record.proven_log_index, Some(4));
        assert_eq!(record.finalized_success, Some(true));
        assert!(record.is_finalized());

        let pending =
            store.get_withdrawals_by_address(from, page, FinalizationState::Unfinalized).await.unwrap();
        assert_eq!(pending.pagination.total, 1);
        assert_eq!(pending.items[0].withdrawal_hash, None);
    }

    #[tokio::test]
    async fn test_state_batch_chain() {
        let store = MemoryStore::new();
        let l1 = header(1, 10);
        let block = IndexedL1Block {
            state_batches: vec![batch(3, 55, 25, l1.hash), batch(4, 80, 25, l1.hash)],
            ..IndexedL1Block::empty(l1)
        };
        store.add_indexed_l1_block(&block).await.unwrap();

        let gap = store.add_state_batches(&[batch(5, 100, 10, l1.hash)]).await;
        assert!(gap.unwrap_err().is_integrity());
        let orphan = store.add_state_batches(&[batch(5, 105, 10, B256::repeat_byte(0x77))]).await;
        assert!(orphan.unwrap_err().is_integrity());

        store.add_state_batches(&[batch(5, 105, 10, l1.hash)]).await.unwrap();
        assert_eq!(store.state_batches().len(), 3);
    }

    #[tokio::test]
    async fn test_withdrawal_batch_lookup() {
        let store = MemoryStore::new();
        let l1 = header(1, 10);
        let block = IndexedL1Block {
            state_batches: vec![batch(3, 55, 25, l1.hash), batch(4, 80, 25, l1.hash)],
            ..IndexedL1Block::empty(l1)
        };
        store.add_indexed_l1_block(&block).await.unwrap();

        let from = Address::repeat_byte(1);
        let l2 = IndexedL2Block {
            withdrawals: vec![withdrawal(from, 1, None)],
            ..IndexedL2Block::empty(header(100, 1_000))
        };
        store.add_indexed_l2_block(&l2).await.unwrap();

        let found = store.get_withdrawal_batch(B256::repeat_byte(1)).await.unwrap().unwrap();
        assert_eq!(found.index, 4);
        assert_eq!(found.block_number, 1);
        assert_eq!(store.get_withdrawal_batch(B256::repeat_byte(0xee)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_highest_block_and_lookup() {
        let store = MemoryStore::new();
        assert_eq!(store.get_highest_l1_block().await.unwrap(), None);
        for n in [1, 2, 4] {
            store.add_indexed_l1_block(&IndexedL1Block::empty(header(n, n))).await.unwrap();
        }
        assert_eq!(store.get_highest_l1_block().await.unwrap(), Some(header(4, 4).locator()));
        assert_eq!(
            store.get_indexed_l1_block_by_hash(header(2, 2).hash).await.unwrap(),
            Some(header(2, 2))
        );
        assert_eq!(store.get_highest_l2_block().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_airdrop_lookup_is_case_insensitive() {
        let store = MemoryStore::new();
        let address = alloy_primitives::address!("0x10E6593CDda8c58a1d0f14C5164B376352a55f2F");
        store.insert_airdrop(Airdrop {
            address: address.to_checksum(None),
            voter_amount: "1".into(),
            multisig_signer_amount: "0".into(),
            gitcoin_amount: "0".into(),
            active_bridged_amount: "2".into(),
            op_user_amount: "0".into(),
            op_repeat_user_amount: "0".into(),
            bonus_amount: "0".into(),
            total_amount: "3".into(),
        });

        let airdrop = store.get_airdrop(address).await.unwrap().unwrap();
        assert_eq!(airdrop.total_amount, "3");
        assert_eq!(airdrop.address, format!("{address:#x}"));
        assert_eq!(store.get_airdrop(Address::ZERO).await.unwrap(), None);
    }
}

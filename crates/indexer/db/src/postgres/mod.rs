//! PostgreSQL implementation of the bridge store.

mod rows;
use rows::{BlockRow, DepositRow, StateBatchRow, TokenRow, WithdrawalRow};

mod schema;
use schema::SCHEMA;

use crate::{
    Airdrop, BlockHeader, BlockLocator, BridgeStoreReader, BridgeStoreWriter, DepositRecord,
    FinalizationState, IndexedL1Block, IndexedL2Block, Paginated, PaginationParam, StateBatch,
    StateBatchRecord, StoreError, Token, WithdrawalRecord,
    codec::{address_column, hash_column, to_i64, to_u64},
};
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use sqlx::{
    PgConnection, Postgres, Transaction,
    postgres::{PgPool, PgPoolOptions},
};
use tracing::{debug, info};

const INSERT_BLOCK_L1: &str =
    "INSERT INTO l1_blocks (hash, parent_hash, number, timestamp) VALUES ($1, $2, $3, $4)";
const INSERT_BLOCK_L2: &str =
    "INSERT INTO l2_blocks (hash, parent_hash, number, timestamp) VALUES ($1, $2, $3, $4)";

const INSERT_DEPOSIT: &str = r#"
INSERT INTO deposits
    (guid, from_address, to_address, l1_token, l2_token, amount, data, log_index, block_hash, tx_hash)
VALUES
    ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
"#;

const INSERT_WITHDRAWAL: &str = r#"
INSERT INTO withdrawals
    (guid, from_address, to_address, l1_token, l2_token, amount, data, log_index, block_hash,
     tx_hash, withdrawal_hash)
VALUES
    ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
"#;

const UPDATE_PROVEN: &str = r#"
UPDATE withdrawals SET (proven_tx_hash, proven_log_index) = ($1, $2)
WHERE withdrawal_hash = $3 AND proven_tx_hash IS NULL
"#;

const UPDATE_FINALIZED: &str = r#"
UPDATE withdrawals SET (finalized_tx_hash, finalized_log_index, finalized_success) = ($1, $2, $3)
WHERE withdrawal_hash = $4 AND finalized_tx_hash IS NULL
"#;

const INSERT_STATE_BATCH: &str = r#"
INSERT INTO state_batches (index, root, size, prev_total, extra_data, block_hash)
VALUES ($1, $2, $3, $4, $5, $6)
"#;

const SELECT_DEPOSITS: &str = r#"
SELECT
    deposits.guid, deposits.from_address, deposits.to_address,
    deposits.l1_token, l1_tokens.name AS l1_token_name, l1_tokens.symbol AS l1_token_symbol,
    l1_tokens.decimals AS l1_token_decimals,
    deposits.l2_token, deposits.amount, deposits.data, deposits.log_index,
    l1_blocks.number AS block_number, l1_blocks.timestamp AS block_timestamp, deposits.tx_hash
FROM deposits
    INNER JOIN l1_blocks ON deposits.block_hash = l1_blocks.hash
    INNER JOIN l1_tokens ON deposits.l1_token = l1_tokens.address
WHERE deposits.from_address = $1
ORDER BY l1_blocks.timestamp, l1_blocks.number, deposits.log_index
LIMIT $2 OFFSET $3
"#;

const SELECT_WITHDRAWALS: &str = r#"
SELECT
    withdrawals.guid, withdrawals.from_address, withdrawals.to_address, withdrawals.l1_token,
    withdrawals.l2_token, l2_tokens.name AS l2_token_name, l2_tokens.symbol AS l2_token_symbol,
    l2_tokens.decimals AS l2_token_decimals,
    withdrawals.amount, withdrawals.data, withdrawals.log_index,
    l2_blocks.number AS block_number, l2_blocks.timestamp AS block_timestamp,
    withdrawals.tx_hash, withdrawals.withdrawal_hash,
    withdrawals.proven_tx_hash, withdrawals.proven_log_index,
    withdrawals.finalized_tx_hash, withdrawals.finalized_log_index, withdrawals.finalized_success
FROM withdrawals
    INNER JOIN l2_blocks ON withdrawals.block_hash = l2_blocks.hash
    INNER JOIN l2_tokens ON withdrawals.l2_token = l2_tokens.address
WHERE withdrawals.from_address = $1
"#;

const SELECT_WITHDRAWAL_BATCH: &str = r#"
SELECT
    state_batches.index, state_batches.root, state_batches.size, state_batches.prev_total,
    state_batches.extra_data, state_batches.block_hash,
    l1_blocks.number AS block_number, l1_blocks.timestamp AS block_timestamp
FROM state_batches
    INNER JOIN l1_blocks ON state_batches.block_hash = l1_blocks.hash
WHERE state_batches.size + state_batches.prev_total >= (
    SELECT l2_blocks.number
    FROM withdrawals
        INNER JOIN l2_blocks ON withdrawals.block_hash = l2_blocks.hash
    WHERE withdrawals.tx_hash = $1
    LIMIT 1
)
ORDER BY state_batches.index
LIMIT 1
"#;

/// The two token tables.
#[derive(Debug, Clone, Copy)]
enum TokenTable {
    L1,
    L2,
}

impl TokenTable {
    const fn name(self) -> &'static str {
        match self {
            Self::L1 => "l1_tokens",
            Self::L2 => "l2_tokens",
        }
    }
}

/// Bridge store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool. The schema is not touched.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `url` with at most `max_connections` pooled connections.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().max_connections(max_connections).connect(url).await?;
        Ok(Self { pool })
    }

    /// Creates missing tables and seeds the native ether tokens.
    ///
    /// Safe to run against an already bootstrapped database.
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;

        let mut tx = self.pool.begin().await?;
        for token in Token::l1_seeds() {
            Self::seed_token(&mut tx, TokenTable::L1, &token).await?;
        }
        for token in Token::l2_seeds() {
            Self::seed_token(&mut tx, TokenTable::L2, &token).await?;
        }
        tx.commit().await?;

        info!(target: "store", "Database schema ready");
        Ok(())
    }

    /// Returns the underlying pool.
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn seed_token(
        tx: &mut Transaction<'_, Postgres>,
        table: TokenTable,
        token: &Token,
    ) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO {} (address, name, symbol, decimals) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (address) DO NOTHING",
            table.name()
        );
        sqlx::query(&query)
            .bind(address_column(&token.address))
            .bind(&token.name)
            .bind(&token.symbol)
            .bind(i32::from(token.decimals))
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn add_token(&self, table: TokenTable, token: &Token) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        Self::seed_token(&mut tx, table, token).await?;

        let query =
            format!("SELECT address, name, symbol, decimals FROM {} WHERE address = $1", table.name());
        let stored: Token = sqlx::query_as::<_, TokenRow>(&query)
            .bind(address_column(&token.address))
            .fetch_one(&mut *tx)
            .await?
            .try_into()?;
        if &stored != token {
            return Err(StoreError::Integrity(format!(
                "token {} already stored with different metadata",
                token.address
            )));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_token(
        &self,
        table: TokenTable,
        address: Address,
    ) -> Result<Option<Token>, StoreError> {
        let query =
            format!("SELECT address, name, symbol, decimals FROM {} WHERE address = $1", table.name());
        sqlx::query_as::<_, TokenRow>(&query)
            .bind(address_column(&address))
            .fetch_optional(&self.pool)
            .await?
            .map(Token::try_from)
            .transpose()
    }

    async fn insert_block(
        conn: &mut PgConnection,
        statement: &str,
        header: &BlockHeader,
    ) -> Result<(), StoreError> {
        sqlx::query(statement)
            .bind(hash_column(&header.hash))
            .bind(hash_column(&header.parent_hash))
            .bind(to_i64("number", header.number)?)
            .bind(to_i64("timestamp", header.timestamp)?)
            .execute(conn)
            .await?;
        Ok(())
    }

    async fn insert_state_batches(
        conn: &mut PgConnection,
        batches: &[StateBatch],
    ) -> Result<(), StoreError> {
        let Some(first) = batches.first() else {
            return Ok(());
        };

        let previous: Option<(i64, i64)> = match first.index.checked_sub(1) {
            Some(prev_index) => {
                sqlx::query_as("SELECT size, prev_total FROM state_batches WHERE index = $1")
                    .bind(to_i64("index", prev_index)?)
                    .fetch_optional(&mut *conn)
                    .await?
            }
            None => None,
        };
        let mut expected_prev_total = previous
            .map(|(size, prev_total)| -> Result<u64, StoreError> {
                Ok(to_u64("size", size)? + to_u64("prev_total", prev_total)?)
            })
            .transpose()?;

        for batch in batches {
            if let Some(expected) = expected_prev_total &&
                expected != batch.prev_total
            {
                return Err(StoreError::Integrity(format!(
                    "state batch {} starts at {} but the previous batch ends at {expected}",
                    batch.index, batch.prev_total
                )));
            }
            sqlx::query(INSERT_STATE_BATCH)
                .bind(to_i64("index", batch.index)?)
                .bind(hash_column(&batch.root))
                .bind(to_i64("size", batch.size)?)
                .bind(to_i64("prev_total", batch.prev_total)?)
                .bind(batch.extra_data.as_ref())
                .bind(hash_column(&batch.block_hash))
                .execute(&mut *conn)
                .await?;
            expected_prev_total = Some(batch.total_elements());
        }
        Ok(())
    }

    async fn highest_block(&self, table: &str) -> Result<Option<BlockLocator>, StoreError> {
        let query = format!(
            "SELECT hash, parent_hash, number, timestamp FROM {table} ORDER BY number DESC LIMIT 1"
        );
        let header = sqlx::query_as::<_, BlockRow>(&query)
            .fetch_optional(&self.pool)
            .await?
            .map(BlockHeader::try_from)
            .transpose()?;
        Ok(header.map(|h| h.locator()))
    }
}

#[async_trait]
impl BridgeStoreWriter for PgStore {
    async fn add_indexed_l1_block(&self, block: &IndexedL1Block) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let block_hash = hash_column(&block.header.hash);

        Self::insert_block(&mut tx, INSERT_BLOCK_L1, &block.header).await?;

        for deposit in &block.deposits {
            sqlx::query(INSERT_DEPOSIT)
                .bind(deposit.guid)
                .bind(address_column(&deposit.from))
                .bind(address_column(&deposit.to))
                .bind(address_column(&deposit.l1_token))
                .bind(address_column(&deposit.l2_token))
                .bind(deposit.amount.to_string())
                .bind(deposit.data.as_ref())
                .bind(to_i64("log_index", deposit.log_index)?)
                .bind(&block_hash)
                .bind(hash_column(&deposit.tx_hash))
                .execute(&mut *tx)
                .await?;
        }

        for proven in &block.proven_withdrawals {
            let result = sqlx::query(UPDATE_PROVEN)
                .bind(hash_column(&proven.tx_hash))
                .bind(to_i64("proven_log_index", proven.log_index)?)
                .bind(hash_column(&proven.withdrawal_hash))
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                debug!(
                    target: "store",
                    withdrawal_hash = %proven.withdrawal_hash,
                    "No unproven withdrawal matches proof"
                );
            }
        }

        for finalized in &block.finalized_withdrawals {
            let result = sqlx::query(UPDATE_FINALIZED)
                .bind(hash_column(&finalized.tx_hash))
                .bind(to_i64("finalized_log_index", finalized.log_index)?)
                .bind(finalized.success)
                .bind(hash_column(&finalized.withdrawal_hash))
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                debug!(
                    target: "store",
                    withdrawal_hash = %finalized.withdrawal_hash,
                    "No unfinalized withdrawal matches finalization"
                );
            }
        }

        Self::insert_state_batches(&mut tx, &block.state_batches).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn add_indexed_l2_block(&self, block: &IndexedL2Block) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let block_hash = hash_column(&block.header.hash);

        Self::insert_block(&mut tx, INSERT_BLOCK_L2, &block.header).await?;

        for withdrawal in &block.withdrawals {
            sqlx::query(INSERT_WITHDRAWAL)
                .bind(withdrawal.guid)
                .bind(address_column(&withdrawal.from))
                .bind(address_column(&withdrawal.to))
                .bind(address_column(&withdrawal.l1_token))
                .bind(address_column(&withdrawal.l2_token))
                .bind(withdrawal.amount.to_string())
                .bind(withdrawal.data.as_ref())
                .bind(to_i64("log_index", withdrawal.log_index)?)
                .bind(&block_hash)
                .bind(hash_column(&withdrawal.tx_hash))
                .bind(withdrawal.withdrawal_hash.as_ref().map(hash_column))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn add_state_batches(&self, batches: &[StateBatch]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        Self::insert_state_batches(&mut tx, batches).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn add_l1_token(&self, token: &Token) -> Result<(), StoreError> {
        self.add_token(TokenTable::L1, token).await
    }

    async fn add_l2_token(&self, token: &Token) -> Result<(), StoreError> {
        self.add_token(TokenTable::L2, token).await
    }
}

#[async_trait]
impl BridgeStoreReader for PgStore {
    async fn get_l1_token_by_address(
        &self,
        address: Address,
    ) -> Result<Option<Token>, StoreError> {
        self.get_token(TokenTable::L1, address).await
    }

    async fn get_l2_token_by_address(
        &self,
        address: Address,
    ) -> Result<Option<Token>, StoreError> {
        self.get_token(TokenTable::L2, address).await
    }

    async fn get_highest_l1_block(&self) -> Result<Option<BlockLocator>, StoreError> {
        self.highest_block("l1_blocks").await
    }

    async fn get_highest_l2_block(&self) -> Result<Option<BlockLocator>, StoreError> {
        self.highest_block("l2_blocks").await
    }

    async fn get_indexed_l1_block_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<BlockHeader>, StoreError> {
        sqlx::query_as::<_, BlockRow>(
            "SELECT hash, parent_hash, number, timestamp FROM l1_blocks WHERE hash = $1",
        )
        .bind(hash_column(&hash))
        .fetch_optional(&self.pool)
        .await?
        .map(BlockHeader::try_from)
        .transpose()
    }

    async fn get_deposits_by_address(
        &self,
        address: Address,
        page: PaginationParam,
    ) -> Result<Paginated<DepositRecord>, StoreError> {
        let address = address_column(&address);

        let items = sqlx::query_as::<_, DepositRow>(SELECT_DEPOSITS)
            .bind(&address)
            .bind(to_i64("limit", page.limit)?)
            .bind(to_i64("offset", page.offset)?)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(DepositRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM deposits WHERE from_address = $1")
                .bind(&address)
                .fetch_one(&self.pool)
                .await?;

        Ok(Paginated::new(page, to_u64("total", total)?, items))
    }

    async fn get_withdrawals_by_address(
        &self,
        address: Address,
        page: PaginationParam,
        state: FinalizationState,
    ) -> Result<Paginated<WithdrawalRecord>, StoreError> {
        let address = address_column(&address);
        let filter = match state {
            FinalizationState::Any => "",
            FinalizationState::Finalized => "AND withdrawals.finalized_tx_hash IS NOT NULL",
            FinalizationState::Unfinalized => "AND withdrawals.finalized_tx_hash IS NULL",
        };

        let query = format!(
            "{SELECT_WITHDRAWALS} {filter} \
             ORDER BY l2_blocks.timestamp, l2_blocks.number, withdrawals.log_index \
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, WithdrawalRow>(&query)
            .bind(&address)
            .bind(to_i64("limit", page.limit)?)
            .bind(to_i64("offset", page.offset)?)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(WithdrawalRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let count = format!("SELECT COUNT(*) FROM withdrawals WHERE from_address = $1 {filter}");
        let total: i64 = sqlx::query_scalar(&count).bind(&address).fetch_one(&self.pool).await?;

        Ok(Paginated::new(page, to_u64("total", total)?, items))
    }

    async fn get_withdrawal_batch(
        &self,
        tx_hash: B256,
    ) -> Result<Option<StateBatchRecord>, StoreError> {
        sqlx::query_as::<_, StateBatchRow>(SELECT_WITHDRAWAL_BATCH)
            .bind(hash_column(&tx_hash))
            .fetch_optional(&self.pool)
            .await?
            .map(StateBatchRecord::try_from)
            .transpose()
    }

    async fn get_airdrop(&self, address: Address) -> Result<Option<Airdrop>, StoreError> {
        Ok(sqlx::query_as::<_, Airdrop>(
            r#"
            SELECT address, voter_amount, multisig_signer_amount, gitcoin_amount,
                   active_bridged_amount, op_user_amount, op_repeat_user_amount,
                   bonus_amount, total_amount
            FROM airdrops
            WHERE address = $1
            "#,
        )
        .bind(address_column(&address))
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    //! Tests marked `#[ignore]` need a PostgreSQL server at `DATABASE_URL`; run them with
    //! `cargo test -p boba-indexer-db -- --ignored`. Each test works in a fresh schema.

    use super::*;
    use crate::{Deposit, FinalizedWithdrawal, ProvenWithdrawal, Withdrawal};
    use alloy_primitives::{Bytes, U256};
    use boba_indexer_bindings::LEGACY_L2_ETH;
    use sqlx::postgres::PgConnectOptions;
    use std::str::FromStr;
    use uuid::Uuid;

    async fn test_store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL is not set");
        let schema = format!("indexer_test_{}", Uuid::new_v4().simple());

        let admin = PgPool::connect(&url).await.unwrap();
        sqlx::query(&format!("CREATE SCHEMA {schema}")).execute(&admin).await.unwrap();
        admin.close().await;

        let options =
            PgConnectOptions::from_str(&url).unwrap().options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new().max_connections(2).connect_with(options).await.unwrap();
        let store = PgStore::new(pool);
        store.bootstrap().await.unwrap();
        store
    }

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
            l2_token: LEGACY_L2_ETH,
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
            l2_token: LEGACY_L2_ETH,
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
            extra_data: Bytes::from_static(&[0xca, 0xfe]),
            block_hash,
        }
    }

    #[tokio::test]
    async fn test_page_beyond_column_range_is_rejected() {
        let pool = PgPoolOptions::new().connect_lazy("postgres://localhost/unused").unwrap();
        let store = PgStore::new(pool);
        let from = Address::repeat_byte(1);

        let err = store
            .get_deposits_by_address(from, PaginationParam::new(u64::MAX, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange("limit")));

        let err = store
            .get_withdrawals_by_address(
                from,
                PaginationParam::new(10, u64::MAX),
                FinalizationState::Any,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange("offset")));
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_bootstrap_is_idempotent() {
        let store = test_store().await;
        store.bootstrap().await.unwrap();

        let eth = store.get_l1_token_by_address(Address::ZERO).await.unwrap().unwrap();
        assert_eq!(eth.symbol, "ETH");
        assert!(store.get_l2_token_by_address(LEGACY_L2_ETH).await.unwrap().is_some());
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_duplicate_block_is_integrity_error() {
        let store = test_store().await;
        store.add_indexed_l1_block(&IndexedL1Block::empty(header(1, 10))).await.unwrap();

        let err = store.add_indexed_l1_block(&IndexedL1Block::empty(header(1, 10))).await;
        assert!(err.unwrap_err().is_integrity());

        let mut same_number = header(1, 10);
        same_number.hash = B256::repeat_byte(0xff);
        let err = store.add_indexed_l1_block(&IndexedL1Block::empty(same_number)).await;
        assert!(err.unwrap_err().is_integrity());
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_failed_write_is_rolled_back() {
        let store = test_store().await;
        let from = Address::repeat_byte(1);
        let mut unknown_token = deposit(from, 1);
        unknown_token.l1_token = Address::repeat_byte(0x99);

        let block = IndexedL1Block {
            deposits: vec![deposit(from, 0), unknown_token],
            ..IndexedL1Block::empty(header(1, 10))
        };
        assert!(store.add_indexed_l1_block(&block).await.unwrap_err().is_integrity());
        assert_eq!(store.get_highest_l1_block().await.unwrap(), None);

        let deposits =
            store.get_deposits_by_address(from, PaginationParam::default()).await.unwrap();
        assert_eq!(deposits.pagination.total, 0);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_token_is_write_once() {
        let store = test_store().await;
        let token = Token {
            address: Address::repeat_byte(2),
            name: "Boba".into(),
            symbol: "BOBA".into(),
            decimals: 18,
        };
        store.add_l2_token(&token).await.unwrap();
        store.add_l2_token(&token).await.unwrap();

        let conflicting = Token { symbol: "BOBA2".into(), ..token.clone() };
        assert!(store.add_l2_token(&conflicting).await.unwrap_err().is_integrity());
        assert_eq!(store.get_l2_token_by_address(token.address).await.unwrap(), Some(token));
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_deposits_paginate_by_timestamp() {
        let store = test_store().await;
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
        let numbers: Vec<_> = first.items.iter().map(|d| d.block_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(first.items[0].l1_token.symbol, "ETH");
        assert_eq!(first.items[0].amount, U256::from(1_000u64));

        let second = store.get_deposits_by_address(from, PaginationParam::new(2, 2)).await.unwrap();
        let numbers: Vec<_> = second.items.iter().map(|d| d.block_number).collect();
        assert_eq!(numbers, vec![3]);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_withdrawal_proof_and_finalization_are_write_once() {
        let store = test_store().await;
        let from = Address::repeat_byte(1);
        let hash = B256::repeat_byte(0xab);
        let l2 = IndexedL2Block {
            withdrawals: vec![withdrawal(from, 1, Some(hash)), withdrawal(from, 2, None)],
            ..IndexedL2Block::empty(header(5, 50))
        };
        store.add_indexed_l2_block(&l2).await.unwrap();

        let proven =
            ProvenWithdrawal { withdrawal_hash: hash, tx_hash: B256::repeat_byte(3), log_index: 4 };
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

        let l1 = IndexedL1Block {
            proven_withdrawals: vec![ProvenWithdrawal { tx_hash: B256::repeat_byte(9), ..proven }],
            finalized_withdrawals: vec![FinalizedWithdrawal {
                tx_hash: B256::repeat_byte(10),
                success: false,
                ..finalized
            }],
            ..IndexedL1Block::empty(header(2, 72))
        };
        store.add_indexed_l1_block(&l1).await.unwrap();

        let page = PaginationParam::default();
        let all =
            store.get_withdrawals_by_address(from, page, FinalizationState::Any).await.unwrap();
        assert_eq!(all.pagination.total, 2);

        let done = store
            .get_withdrawals_by_address(from, page, FinalizationState::Finalized)
            .await
            .unwrap();
        assert_eq!(done.pagination.total, 1);
        assert_eq!(done.items.len(), 1);
        let record = &done.items[0];
        assert_eq!(record.proven_tx_hash, Some(B256::repeat_byte(3)));
        assert_eq!(record.proven_log_index, Some(4));
        assert_eq!(record.finalized_tx_hash, Some(B256::repeat_byte(5)));
        assert_eq!(record.finalized_success, Some(true));

        let pending = store
            .get_withdrawals_by_address(from, page, FinalizationState::Unfinalized)
            .await
            .unwrap();
        assert_eq!(pending.pagination.total, 1);
        assert_eq!(pending.items[0].withdrawal_hash, None);
        assert_eq!(pending.items[0].l2_token.symbol, "ETH");
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_state_batch_chain() {
        let store = test_store().await;
        let l1 = header(1, 10);
        let block = IndexedL1Block {
            state_batches: vec![batch(4, 55, 25, l1.hash), batch(5, 80, 25, l1.hash)],
            ..IndexedL1Block::empty(l1)
        };
        store.add_indexed_l1_block(&block).await.unwrap();

        let gap = store.add_state_batches(&[batch(6, 100, 10, l1.hash)]).await;
        assert!(gap.unwrap_err().is_integrity());
        let orphan = store.add_state_batches(&[batch(6, 105, 10, B256::repeat_byte(0x77))]).await;
        assert!(orphan.unwrap_err().is_integrity());
        let duplicate = store.add_state_batches(&[batch(5, 80, 25, l1.hash)]).await;
        assert!(duplicate.unwrap_err().is_integrity());

        store.add_state_batches(&[batch(6, 105, 10, l1.hash)]).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_withdrawal_batch_lookup() {
        let store = test_store().await;
        let l1 = header(4, 48);
        let block = IndexedL1Block {
            state_batches: vec![batch(4, 55, 25, l1.hash), batch(5, 80, 25, l1.hash)],
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
        assert_eq!(found.index, 5);
        assert_eq!(found.prev_total, 80);
        assert_eq!(found.size, 25);
        assert_eq!(found.block_number, 4);
        assert_eq!(store.get_withdrawal_batch(B256::repeat_byte(0xee)).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_highest_block_and_lookup() {
        let store = test_store().await;
        assert_eq!(store.get_highest_l1_block().await.unwrap(), None);
        for n in [1, 2, 4] {
            store.add_indexed_l1_block(&IndexedL1Block::empty(header(n, n))).await.unwrap();
        }
        store.add_indexed_l2_block(&IndexedL2Block::empty(header(9, 9))).await.unwrap();

        assert_eq!(store.get_highest_l1_block().await.unwrap(), Some(header(4, 4).locator()));
        assert_eq!(store.get_highest_l2_block().await.unwrap(), Some(header(9, 9).locator()));
        assert_eq!(
            store.get_indexed_l1_block_by_hash(header(2, 2).hash).await.unwrap(),
            Some(header(2, 2))
        );
        assert_eq!(store.get_indexed_l1_block_by_hash(B256::ZERO).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_airdrop_lookup() {
        let store = test_store().await;
        let address = Address::repeat_byte(0xaa);
        sqlx::query(
            "INSERT INTO airdrops VALUES ($1, '1', '0', '0', '2', '0', '0', '0', '3')",
        )
        .bind(address_column(&address))
        .execute(store.pool())
        .await
        .unwrap();

        let airdrop = store.get_airdrop(address).await.unwrap().unwrap();
        assert_eq!(airdrop.total_amount, "3");
        assert_eq!(airdrop.active_bridged_amount, "2");
        assert_eq!(store.get_airdrop(Address::ZERO).await.unwrap(), None);
    }
}

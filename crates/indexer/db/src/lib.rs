#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod codec;

mod error;
pub use error::StoreError;

mod types;
pub use types::{
    Airdrop, BlockHeader, BlockLocator, Deposit, FinalizedWithdrawal, IndexedL1Block,
    IndexedL2Block, ProvenWithdrawal, StateBatch, Token, Withdrawal,
};

mod records;
pub use records::{
    DepositRecord, FinalizationState, Paginated, Pagination, PaginationParam, StateBatchRecord,
    WithdrawalRecord,
};

mod traits;
pub use traits::{BridgeStore, BridgeStoreReader, BridgeStoreWriter};

mod postgres;
pub use postgres::PgStore;

#[cfg(any(test, feature = "test-utils"))]
mod memory;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;

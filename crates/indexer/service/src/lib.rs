#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod alloy;
pub use alloy::AlloyChainClient;

pub mod bridge;

mod client;
pub use client::{ChainClient, verify_chain_id};

mod config;
pub use config::IndexerConfig;

mod driver;
pub use driver::IndexerDriver;

mod error;
pub use error::{ClientError, IndexerError, ReaderError};

mod indexer;
pub use indexer::{ChainIndexer, L1Indexer, L2Indexer, Side, UpdateOutcome};

mod metrics;
pub use metrics::Metrics;

mod retry;

mod selector;
pub use selector::{ConfirmedHeaderSelector, HEADER_BATCH_SIZE};

mod status;
pub use status::{HeadTracker, SyncStatus};

mod tokens;
pub use tokens::TokenCache;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

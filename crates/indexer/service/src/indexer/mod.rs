//! The per-chain indexers.

use crate::{IndexerConfig, IndexerError};
use async_trait::async_trait;
use boba_indexer_db::{BlockHeader, BlockLocator};
use derive_more::Display;
use std::fmt::Debug;

mod l1;
pub use l1::L1Indexer;

mod l2;
pub use l2::L2Indexer;

/// The chain an indexer follows.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The settlement layer.
    #[display("l1")]
    L1,
    /// The rollup layer.
    #[display("l2")]
    L2,
}

/// Result of a successful [`ChainIndexer::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Blocks were persisted and more confirmed blocks remain below the head.
    Progressed,
    /// The persisted height reached the highest confirmed block under the head.
    NoNewBlocks,
}

/// An indexer of one chain, driven by an [`IndexerDriver`](crate::IndexerDriver).
#[async_trait]
pub trait ChainIndexer: Debug + Send {
    /// The chain this indexer follows.
    fn side(&self) -> Side;

    /// The indexer configuration.
    fn config(&self) -> &IndexerConfig;

    /// Fetches the latest header of the chain.
    async fn chain_head(&self) -> Result<BlockHeader, IndexerError>;

    /// Returns the highest persisted block.
    ///
    /// When nothing is persisted yet, the header at the configured start height is persisted
    /// as an empty block and returned.
    async fn resume_point(&self) -> Result<BlockLocator, IndexerError>;

    /// Indexes the next range of confirmed blocks under `head`.
    ///
    /// Nothing is persisted if reading events fails. Blocks are persisted one transaction each,
    /// in increasing height.
    async fn update(&mut self, head: &BlockHeader) -> Result<UpdateOutcome, IndexerError>;
}

/// Checks that `first` extends the persisted block `lowest`.
pub(crate) fn check_continuity(
    side: Side,
    lowest: BlockLocator,
    first: &BlockHeader,
) -> Result<(), IndexerError> {
    if lowest.number > 0 && first.parent_hash != lowest.hash {
        error!(
            target: "indexer",
            %side,
            number = first.number,
            parent = %first.parent_hash,
            stored = %lowest.hash,
            "Selected headers do not extend the stored chain, possible reorg"
        );
        return Err(IndexerError::ParentMismatch {
            number: first.number,
            expected: lowest.hash,
            actual: first.parent_hash,
        });
    }
    Ok(())
}

/// Outcome of an update that persisted up to `end` under `head`.
pub(crate) const fn outcome(end: u64, conf_depth: u64, head: u64) -> UpdateOutcome {
    if end + conf_depth - 1 >= head { UpdateOutcome::NoNewBlocks } else { UpdateOutcome::Progressed }
}

//! Per-side indexer configuration.

use crate::{ConfirmedHeaderSelector, IndexerError};
use std::time::Duration;

/// Configuration of one chain indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Blocks a header must be buried under, itself included, before it is indexed.
    pub conf_depth: u64,
    /// Maximum number of headers indexed in one update.
    pub max_header_batch_size: u64,
    /// Height the indexer starts from when the store holds no block for its side.
    pub start_block_number: u64,
    /// Period of the tip-follow ticker.
    pub poll_interval: Duration,
    /// Pause after a failed update.
    pub retry_delay: Duration,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            conf_depth: 1,
            max_header_batch_size: 500,
            start_block_number: 0,
            poll_interval: Duration::from_secs(5),
            retry_delay: Duration::from_secs(10),
        }
    }
}

impl IndexerConfig {
    /// Checks the configuration and returns the header selector it describes.
    pub fn selector(&self) -> Result<ConfirmedHeaderSelector, IndexerError> {
        if self.poll_interval.is_zero() {
            return Err(IndexerError::Config("poll interval must be positive".into()));
        }
        ConfirmedHeaderSelector::new(self.conf_depth, self.max_header_batch_size)
    }
}

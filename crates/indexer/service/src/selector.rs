//! Selection of confirmed header ranges.

use crate::{ChainClient, ClientError, IndexerError, retry::with_retry};
use boba_indexer_db::{BlockHeader, BlockLocator};
use std::ops::RangeInclusive;

/// Maximum number of headers requested in one JSON-RPC batch.
pub const HEADER_BATCH_SIZE: u64 = 100;

/// Picks the next range of confirmed headers to index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedHeaderSelector {
    /// Blocks a header must be buried under before it is selected, including itself.
    conf_depth: u64,
    /// Maximum number of headers selected at once.
    max_batch_size: u64,
}

impl ConfirmedHeaderSelector {
    /// Creates a selector. Both parameters must be at least one.
    pub fn new(conf_depth: u64, max_batch_size: u64) -> Result<Self, IndexerError> {
        if conf_depth == 0 {
            return Err(IndexerError::Config("confirmation depth must be at least 1".into()));
        }
        if max_batch_size == 0 {
            return Err(IndexerError::Config("max header batch size must be at least 1".into()));
        }
        Ok(Self { conf_depth, max_batch_size })
    }

    /// The configured confirmation depth.
    pub const fn conf_depth(&self) -> u64 {
        self.conf_depth
    }

    /// Highest block number considered confirmed under `head`.
    pub const fn confirmed_height(&self, head: u64) -> Option<u64> {
        head.checked_sub(self.conf_depth - 1)
    }

    /// Returns the range of heights following `lowest` that is confirmed under `head`, clamped
    /// to the maximum batch size. `None` if there is nothing to select.
    pub fn confirmed_range(&self, lowest: u64, head: u64) -> Option<RangeInclusive<u64>> {
        let end = self.confirmed_height(head)?;
        if end <= lowest {
            return None;
        }
        let start = lowest + 1;
        Some(start..=end.min(start.saturating_add(self.max_batch_size - 1)))
    }

    /// Fetches the confirmed headers following `lowest`.
    ///
    /// The returned headers are contiguous and linked by parent hash, but are not checked
    /// against `lowest` itself. An empty result means the caller has to wait for new blocks.
    pub async fn new_headers<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        lowest: BlockLocator,
        head: &BlockHeader,
    ) -> Result<Vec<BlockHeader>, ClientError> {
        let Some(range) = self.confirmed_range(lowest.number, head.number) else {
            return Ok(Vec::new());
        };

        let (start, end) = range.into_inner();
        let mut fetched = Vec::new();
        let mut chunk_start = start;
        while chunk_start <= end {
            let chunk_end = end.min(chunk_start.saturating_add(HEADER_BATCH_SIZE - 1));
            let chunk = with_retry(|| client.headers_by_range(chunk_start, chunk_end)).await?;
            let complete = chunk.len() as u64 == chunk_end - chunk_start + 1 &&
                chunk.iter().all(Option::is_some);
            fetched.extend(chunk);
            let Some(next) = chunk_end.checked_add(1).filter(|_| complete) else {
                break;
            };
            chunk_start = next;
        }

        let headers = contiguous_prefix(start, fetched);
        debug!(
            target: "header_selector",
            start_height = start,
            end_height = end,
            selected = headers.len(),
            "Selected confirmed headers"
        );
        Ok(headers)
    }
}

/// Truncates `fetched` at the first missing header or broken parent link.
fn contiguous_prefix(start: u64, fetched: Vec<Option<BlockHeader>>) -> Vec<BlockHeader> {
    let mut headers: Vec<BlockHeader> = Vec::with_capacity(fetched.len());
    for (expected, header) in (start..).zip(fetched) {
        let Some(header) = header else {
            debug!(target: "header_selector", number = expected, "Header not available yet");
            break;
        };
        if header.number != expected {
            warn!(
                target: "header_selector",
                expected,
                actual = header.number,
                "Node returned an out of order header"
            );
            break;
        }
        if let Some(previous) = headers.last() &&
            previous.hash != header.parent_hash
        {
            error!(
                target: "header_selector",
                number = header.number,
                parent = %header.parent_hash,
                expected = %previous.hash,
                "Parent hash mismatch, possible reorg"
            );
            break;
        }
        headers.push(header);
    }
    headers
}

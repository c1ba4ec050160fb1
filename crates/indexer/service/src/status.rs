//! Chain head tracking and sync status.

use boba_indexer_db::BlockLocator;
use serde::{Deserialize, Serialize};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// The latest chain head observed by an indexer, shared with the API.
#[derive(Debug, Clone, Default)]
pub struct HeadTracker {
    /// Head number plus one, zero while no head was observed.
    inner: Arc<AtomicU64>,
}

impl HeadTracker {
    /// Creates a tracker without an observed head.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `number` as the latest head.
    pub fn set(&self, number: u64) {
        self.inner.store(number.saturating_add(1), Ordering::Relaxed);
    }

    /// Returns the latest observed head.
    pub fn get(&self) -> Option<u64> {
        self.inner.load(Ordering::Relaxed).checked_sub(1)
    }
}

/// Sync status of one side, served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    /// Highest persisted height over the latest observed head height.
    pub synced: f64,
    /// The highest persisted block.
    pub highest: Option<BlockLocator>,
}

impl SyncStatus {
    /// Computes the status from the highest persisted block and the latest head.
    ///
    /// `synced` is zero while either is unknown or the head is the genesis block.
    pub fn new(highest: Option<BlockLocator>, head: Option<u64>) -> Self {
        let synced = match (highest, head) {
            (Some(highest), Some(head)) if head > 0 => highest.number as f64 / head as f64,
            _ => 0.0,
        };
        Self { synced, highest }
    }
}

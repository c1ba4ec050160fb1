//! Shared handler state.

use boba_indexer_db::BridgeStoreReader;
use boba_indexer_service::HeadTracker;
use std::sync::Arc;

/// State shared by the API handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// The store queried by the handlers.
    pub store: Arc<dyn BridgeStoreReader>,
    /// Latest L1 head observed by the L1 indexer.
    pub l1_head: HeadTracker,
    /// Latest L2 head observed by the L2 indexer.
    pub l2_head: HeadTracker,
}

impl ApiState {
    /// Creates the handler state.
    pub const fn new(
        store: Arc<dyn BridgeStoreReader>,
        l1_head: HeadTracker,
        l2_head: HeadTracker,
    ) -> Self {
        Self { store, l1_head, l2_head }
    }
}

//! Request and response types.

use crate::{ApiError, ApiResult};
use boba_indexer_db::{FinalizationState, PaginationParam};
use boba_indexer_service::SyncStatus;
use serde::{Deserialize, Serialize};

/// Query parameters of the address-keyed listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    /// Page size. Defaults to 10, at most [`PageQuery::MAX_LIMIT`].
    pub limit: Option<u64>,
    /// Items to skip. Defaults to 0.
    pub offset: Option<u64>,
    /// Finalization filter of the withdrawal listing.
    pub finalized: Option<bool>,
}

impl PageQuery {
    /// Largest page a single request may ask for.
    pub const MAX_LIMIT: u64 = 100;

    /// Largest offset the store can address.
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    /// The requested page.
    pub fn page(&self) -> ApiResult<PaginationParam> {
        let limit = self.limit.unwrap_or(PaginationParam::DEFAULT_LIMIT);
        if limit > Self::MAX_LIMIT {
            return Err(ApiError::InvalidPage(format!(
                "limit {limit} exceeds {}",
                Self::MAX_LIMIT
            )));
        }
        let offset = self.offset.unwrap_or_default();
        if offset > Self::MAX_OFFSET {
            return Err(ApiError::InvalidPage(format!("offset {offset} is out of range")));
        }
        Ok(PaginationParam::new(limit, offset))
    }

    /// The requested finalization filter.
    pub const fn finalization(&self) -> FinalizationState {
        FinalizationState::from_flag(self.finalized)
    }
}

/// Sync status of both chains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusResponse {
    /// The L1 indexer.
    pub l1: SyncStatus,
    /// The L2 indexer.
    pub l2: SyncStatus,
}

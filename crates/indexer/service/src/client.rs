//! The chain access seam of the indexers.

use crate::{ClientError, IndexerError, Side, retry::with_retry};
use alloy_primitives::Address;
use alloy_rpc_types_eth::{Filter, Log};
use async_trait::async_trait;
use boba_indexer_db::{BlockHeader, Token};
use std::{fmt::Debug, sync::Arc};

/// Read access to an L1 or L2 chain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainClient: Debug + Send + Sync {
    /// Returns the chain id reported by the node.
    async fn chain_id(&self) -> Result<u64, ClientError>;

    /// Returns the header of the latest block.
    async fn latest_header(&self) -> Result<BlockHeader, ClientError>;

    /// Returns the header at `number`, if the node has it.
    async fn header_by_number(&self, number: u64) -> Result<Option<BlockHeader>, ClientError>;

    /// Returns the headers of the inclusive range `start..=end` in a single batched request.
    ///
    /// Positions the node could not serve are `None`.
    async fn headers_by_range(
        &self,
        start: u64,
        end: u64,
    ) -> Result<Vec<Option<BlockHeader>>, ClientError>;

    /// Returns the logs matching `filter`.
    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, ClientError>;

    /// Reads the ERC-20 name, symbol and decimals of `token`.
    async fn erc20_metadata(&self, token: Address) -> Result<Token, ClientError>;
}

#[async_trait]
impl<C: ChainClient + ?Sized> ChainClient for Arc<C> {
    async fn chain_id(&self) -> Result<u64, ClientError> {
        (**self).chain_id().await
    }

    async fn latest_header(&self) -> Result<BlockHeader, ClientError> {
        (**self).latest_header().await
    }

    async fn header_by_number(&self, number: u64) -> Result<Option<BlockHeader>, ClientError> {
        (**self).header_by_number(number).await
    }

    async fn headers_by_range(
        &self,
        start: u64,
        end: u64,
    ) -> Result<Vec<Option<BlockHeader>>, ClientError> {
        (**self).headers_by_range(start, end).await
    }

    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, ClientError> {
        (**self).logs(filter).await
    }

    async fn erc20_metadata(&self, token: Address) -> Result<Token, ClientError> {
        (**self).erc20_metadata(token).await
    }
}

/// Reads the chain id served by `client` and checks it against `expected`, if one is set.
///
/// Returns the served chain id.
pub async fn verify_chain_id<C: ChainClient + ?Sized>(
    side: Side,
    client: &C,
    expected: Option<u64>,
) -> Result<u64, IndexerError> {
    let actual = with_retry(|| client.chain_id()).await?;
    match expected {
        Some(expected) if expected != actual => {
            Err(IndexerError::ChainIdMismatch { side, expected, actual })
        }
        _ => {
            info!(target: "rpc", %side, chain_id = actual, "Connected to chain");
            Ok(actual)
        }
    }
}

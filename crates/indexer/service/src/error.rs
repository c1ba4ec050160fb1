//! Error types of the chain indexers.

use crate::Side;
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::B256;
use alloy_transport::{RpcError, TransportError};
use boba_indexer_bindings::DecodeError;
use boba_indexer_db::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by a [`ChainClient`](crate::ChainClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The JSON-RPC request failed.
    #[error("RPC request failed: {0}")]
    Rpc(#[from] TransportError),

    /// The JSON-RPC request did not complete in time.
    #[error("RPC request timed out after {0:?}")]
    Timeout(Duration),

    /// The node does not know the requested block.
    #[error("Block {0} not found")]
    BlockNotFound(BlockNumberOrTag),

    /// A contract call returned data not matching its ABI.
    #[error("Failed to decode return of {call}: {source}")]
    CallDecode {
        /// The Solidity signature of the call.
        call: &'static str,
        /// The underlying ABI error.
        #[source]
        source: alloy_sol_types::Error,
    },
}

impl ClientError {
    /// Returns `true` if repeating the request may succeed.
    ///
    /// JSON-RPC error responses, such as a reverted call, are final.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Rpc(RpcError::ErrorResp(_)) => false,
            Self::Rpc(_) | Self::Timeout(_) => true,
            Self::BlockNotFound(_) | Self::CallDecode { .. } => false,
        }
    }
}

/// Errors returned by the bridge event readers.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Fetching logs failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A log carrying a known event signature could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A log returned by the node lacks a field only pending logs may omit.
    #[error("Log is missing its {0}")]
    IncompleteLog(&'static str),
}

/// Errors returned by the chain indexers and their driver.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// A chain client request failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Reading bridge events failed.
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The first selected header does not extend the highest stored block.
    #[error("Block {number} has parent {actual}, expected stored block {expected}")]
    ParentMismatch {
        /// Number of the first selected header.
        number: u64,
        /// Hash of the highest stored block.
        expected: B256,
        /// Parent hash of the first selected header.
        actual: B256,
    },

    /// The node does not serve the header the indexer has to start from.
    #[error("Start block {0} not available")]
    MissingHeader(u64),

    /// The chain served by the RPC endpoint is not the configured one.
    #[error("{side} chain id mismatch: expected {expected}, got {actual}")]
    ChainIdMismatch {
        /// The affected side.
        side: Side,
        /// The configured chain id.
        expected: u64,
        /// The chain id reported by the node.
        actual: u64,
    },

    /// The indexer configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl IndexerError {
    /// Returns `true` if retrying cannot recover from the error and the indexer must stop.
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Store(err) => err.is_integrity(),
            Self::ChainIdMismatch { .. } | Self::Config(_) => true,
            Self::Client(_) |
            Self::Reader(_) |
            Self::ParentMismatch { .. } |
            Self::MissingHeader(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_transport::TransportErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case(IndexerError::Store(StoreError::Integrity("dup".into())), true)]
    #[case(IndexerError::Store(StoreError::OutOfRange("number")), false)]
    #[case(IndexerError::Config("conf depth".into()), true)]
    #[case(IndexerError::MissingHeader(10), false)]
    #[case(IndexerError::ChainIdMismatch { side: Side::L1, expected: 1, actual: 5 }, true)]
    #[case(IndexerError::Client(ClientError::Timeout(Duration::from_secs(1))), false)]
    #[case(
        IndexerError::ParentMismatch { number: 2, expected: B256::ZERO, actual: B256::ZERO },
        false
    )]
    fn test_is_fatal(#[case] err: IndexerError, #[case] fatal: bool) {
        assert_eq!(err.is_fatal(), fatal);
    }

    #[test]
    fn test_transient_client_errors() {
        assert!(ClientError::Timeout(Duration::from_secs(1)).is_transient());
        assert!(ClientError::Rpc(TransportErrorKind::backend_gone()).is_transient());
        assert!(!ClientError::BlockNotFound(BlockNumberOrTag::Latest).is_transient());
    }
}

//! JSON-RPC [`ChainClient`] built on alloy.

use crate::{ChainClient, ClientError};
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, Bytes};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types_eth::{Block, Filter, Log, TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;
use alloy_transport::TransportResult;
use async_trait::async_trait;
use boba_indexer_bindings::abi::IERC20Metadata;
use boba_indexer_db::{BlockHeader, Token};
use std::{future::Future, time::Duration};
use url::Url;

/// A [`ChainClient`] speaking JSON-RPC over HTTP.
///
/// Every request is bounded by the configured timeout. Retries are left to the caller.
#[derive(Debug, Clone)]
pub struct AlloyChainClient {
    /// The raw client, used for batched requests.
    rpc: RpcClient,
    /// The provider wrapping `rpc`.
    provider: RootProvider,
    /// Per-request timeout.
    timeout: Duration,
}

impl AlloyChainClient {
    /// Creates a client for the HTTP endpoint at `url`.
    pub fn new_http(url: Url, timeout: Duration) -> Self {
        let rpc = RpcClient::new_http(url);
        let provider = RootProvider::new(rpc.clone());
        Self { rpc, provider, timeout }
    }

    async fn timed<T>(
        &self,
        request: impl Future<Output = TransportResult<T>>,
    ) -> Result<T, ClientError> {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))?
            .map_err(Into::into)
    }

    async fn call<C: SolCall>(&self, token: Address, call: C) -> Result<C::Return, ClientError> {
        let request = TransactionRequest::default()
            .to(token)
            .input(TransactionInput::new(Bytes::from(call.abi_encode())));
        let output = self.timed(async { self.provider.call(request).await }).await?;
        C::abi_decode_returns(&output)
            .map_err(|source| ClientError::CallDecode { call: C::SIGNATURE, source })
    }
}

const fn header_of(block: &Block) -> BlockHeader {
    BlockHeader {
        hash: block.header.hash,
        parent_hash: block.header.inner.parent_hash,
        number: block.header.inner.number,
        timestamp: block.header.inner.timestamp,
    }
}

#[async_trait]
impl ChainClient for AlloyChainClient {
    async fn chain_id(&self) -> Result<u64, ClientError> {
        self.timed(async { self.provider.get_chain_id().await }).await
    }

    async fn latest_header(&self) -> Result<BlockHeader, ClientError> {
        let block = self
            .timed(async { self.provider.get_block_by_number(BlockNumberOrTag::Latest).await })
            .await?
            .ok_or(ClientError::BlockNotFound(BlockNumberOrTag::Latest))?;
        Ok(header_of(&block))
    }

    async fn header_by_number(&self, number: u64) -> Result<Option<BlockHeader>, ClientError> {
        let block = self
            .timed(async {
                self.provider.get_block_by_number(BlockNumberOrTag::Number(number)).await
            })
            .await?;
        Ok(block.as_ref().map(header_of))
    }

    async fn headers_by_range(
        &self,
        start: u64,
        end: u64,
    ) -> Result<Vec<Option<BlockHeader>>, ClientError> {
        let mut batch = self.rpc.new_batch();
        let waiters = (start..=end)
            .map(|number| {
                batch.add_call::<_, Option<Block>>(
                    "eth_getBlockByNumber",
                    &(BlockNumberOrTag::Number(number), false),
                )
            })
            .collect::<TransportResult<Vec<_>>>()?;

        self.timed(async { batch.send().await }).await?;

        let mut headers = Vec::with_capacity(waiters.len());
        for waiter in waiters {
            let block = self.timed(waiter).await?;
            headers.push(block.as_ref().map(header_of));
        }
        Ok(headers)
    }

    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, ClientError> {
        self.timed(async { self.provider.get_logs(filter).await }).await
    }

    async fn erc20_metadata(&self, token: Address) -> Result<Token, ClientError> {
        let name = self.call(token, IERC20Metadata::nameCall {}).await?;
        let symbol = self.call(token, IERC20Metadata::symbolCall {}).await?;
        let decimals = self.call(token, IERC20Metadata::decimalsCall {}).await?;
        Ok(Token { address: token, name, symbol, decimals })
    }
}

//! Write-through cache of bridged token metadata.

use crate::{ChainClient, IndexerError, Metrics, Side, retry::with_retry};
use alloy_primitives::Address;
use boba_indexer_db::{BridgeStore, Token};
use std::collections::HashMap;

/// Token metadata known to one indexer.
///
/// Entries never expire. Only the owning indexer mutates the cache, between its reads and its
/// block writes.
#[derive(Debug, Clone)]
pub struct TokenCache {
    side: Side,
    tokens: HashMap<Address, Token>,
}

impl TokenCache {
    /// Creates a cache seeded with the native ether entries of `side`.
    pub fn new(side: Side) -> Self {
        let seeds = match side {
            Side::L1 => Token::l1_seeds(),
            Side::L2 => Token::l2_seeds(),
        };
        Self { side, tokens: seeds.into_iter().map(|t| (t.address, t)).collect() }
    }

    /// Returns the cached metadata of `address`.
    pub fn get(&self, address: &Address) -> Option<&Token> {
        self.tokens.get(address)
    }

    /// Number of cached tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Makes sure the metadata of `address` is cached and stored.
    ///
    /// Tokens missing from the store are read from the token contract. If the contract cannot
    /// be read, a stub with the address only is stored so indexing can proceed.
    pub async fn ensure<C, S>(
        &mut self,
        address: Address,
        client: &C,
        store: &S,
    ) -> Result<(), IndexerError>
    where
        C: ChainClient + ?Sized,
        S: BridgeStore + ?Sized,
    {
        if self.tokens.contains_key(&address) {
            return Ok(());
        }

        let stored = match self.side {
            Side::L1 => store.get_l1_token_by_address(address).await?,
            Side::L2 => store.get_l2_token_by_address(address).await?,
        };
        if let Some(token) = stored {
            self.tokens.insert(address, token);
            return Ok(());
        }

        let token = match with_retry(|| client.erc20_metadata(address)).await {
            Ok(token) => token,
            Err(err) => {
                warn!(
                    target: "token_cache",
                    side = %self.side,
                    token = %address,
                    %err,
                    "Failed to read token metadata, storing stub"
                );
                Token::stub(address)
            }
        };

        match self.side {
            Side::L1 => store.add_l1_token(&token).await?,
            Side::L2 => store.add_l2_token(&token).await?,
        }
        debug!(
            target: "token_cache",
            side = %self.side,
            token = %address,
            symbol = %token.symbol,
            "Cached token"
        );
        Metrics::record_cached_token(self.side);
        self.tokens.insert(address, token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientError, client::MockChainClient};
    use boba_indexer_bindings::LEGACY_L2_ETH;
    use boba_indexer_db::{BridgeStoreReader, BridgeStoreWriter, MemoryStore};
    use std::time::Duration;

    fn token(byte: u8) -> Token {
        Token {
            address: Address::repeat_byte(byte),
            name: "Boba".into(),
            symbol: "BOBA".into(),
            decimals: 18,
        }
    }

    #[test]
    fn test_seeded_per_side() {
        assert_eq!(TokenCache::new(Side::L1).len(), 1);
        let l2 = TokenCache::new(Side::L2);
        assert!(l2.get(&Address::ZERO).is_some());
        assert!(l2.get(&LEGACY_L2_ETH).is_some());
    }

    #[tokio::test]
    async fn test_reads_contract_once() {
        let store = MemoryStore::new();
        let mut client = MockChainClient::new();
        client
            .expect_erc20_metadata()
            .times(1)
            .returning(|address| Ok(Token { address, ..token(0) }));

        let mut cache = TokenCache::new(Side::L1);
        let address = Address::repeat_byte(7);
        cache.ensure(address, &client, &store).await.unwrap();
        cache.ensure(address, &client, &store).await.unwrap();

        assert_eq!(cache.get(&address).map(|t| t.symbol.as_str()), Some("BOBA"));
        let stored = store.get_l1_token_by_address(address).await.unwrap().unwrap();
        assert_eq!(stored.decimals, 18);
        assert_eq!(store.get_l2_token_by_address(address).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_prefers_store() {
        let store = MemoryStore::new();
        store.add_l2_token(&token(3)).await.unwrap();
        let mut client = MockChainClient::new();
        client.expect_erc20_metadata().never();

        let mut cache = TokenCache::new(Side::L2);
        cache.ensure(Address::repeat_byte(3), &client, &store).await.unwrap();
        assert_eq!(cache.get(&Address::repeat_byte(3)), Some(&token(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stub_on_unreadable_contract() {
        let store = MemoryStore::new();
        let mut client = MockChainClient::new();
        client
            .expect_erc20_metadata()
            .times(3)
            .returning(|_| Err(ClientError::Timeout(Duration::from_secs(30))));

        let mut cache = TokenCache::new(Side::L1);
        let address = Address::repeat_byte(9);
        cache.ensure(address, &client, &store).await.unwrap();

        let stored = store.get_l1_token_by_address(address).await.unwrap();
        assert_eq!(stored, Some(Token::stub(address)));
        assert_eq!(cache.get(&address), Some(&Token::stub(address)));
    }
}

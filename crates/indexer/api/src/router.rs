//! Route table.

use crate::{ApiState, handlers};
use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the API router over `state`.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/v1/deposits/{address}", get(handlers::deposits))
        .route("/v1/withdrawals/{address}", get(handlers::withdrawals))
        .route("/v1/status", get(handlers::status))
        .route("/v1/l1/status", get(handlers::l1_status))
        .route("/v1/l2/status", get(handlers::l2_status))
        .route("/v1/airdrops/{address}", get(handlers::airdrop))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, Bytes, U256};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use boba_indexer_db::{
        Airdrop, BlockHeader, BridgeStoreWriter, Deposit, FinalizedWithdrawal, IndexedL1Block,
        IndexedL2Block, MemoryStore, StateBatch, Withdrawal,
    };
    use boba_indexer_service::HeadTracker;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SENDER: Address = Address::repeat_byte(0xab);

    fn header(number: u64) -> BlockHeader {
        BlockHeader {
            hash: B256::with_last_byte(number as u8),
            parent_hash: B256::with_last_byte(number.saturating_sub(1) as u8),
            number,
            timestamp: 1_000 + number,
        }
    }

    fn deposit(log_index: u64) -> Deposit {
        Deposit {
            guid: Default::default(),
            tx_hash: B256::with_last_byte(0xd0 + log_index as u8),
            l1_token: Address::ZERO,
            l2_token: Address::ZERO,
            from: SENDER,
            to: SENDER,
            amount: U256::from(10u64).pow(U256::from(20)),
            data: Bytes::new(),
            log_index,
        }
    }

    fn withdrawal(tx: u8, hash: u8) -> Withdrawal {
        Withdrawal {
            guid: Default::default(),
            tx_hash: B256::with_last_byte(tx),
            l1_token: Address::ZERO,
            l2_token: Address::ZERO,
            from: SENDER,
            to: SENDER,
            amount: U256::from(1),
            data: Bytes::new(),
            log_index: tx as u64,
            withdrawal_hash: Some(B256::repeat_byte(hash)),
        }
    }

    async fn seeded_state() -> ApiState {
        let store = MemoryStore::new();
        for number in 1..=3 {
            let mut block = IndexedL1Block::empty(header(number));
            block.deposits = vec![deposit(number)];
            store.add_indexed_l1_block(&block).await.unwrap();
        }

        let mut l2_block = IndexedL2Block::empty(header(100));
        l2_block.withdrawals = vec![withdrawal(1, 0x11), withdrawal(2, 0x22)];
        store.add_indexed_l2_block(&l2_block).await.unwrap();

        let mut l1_block = IndexedL1Block::empty(header(4));
        l1_block.finalized_withdrawals = vec![FinalizedWithdrawal {
            withdrawal_hash: B256::repeat_byte(0x22),
            tx_hash: B256::repeat_byte(0xf1),
            log_index: 0,
            success: true,
        }];
        l1_block.state_batches = vec![StateBatch {
            index: 5,
            root: B256::repeat_byte(5),
            size: 25,
            prev_total: 80,
            extra_data: Bytes::new(),
            block_hash: header(4).hash,
        }];
        store.add_indexed_l1_block(&l1_block).await.unwrap();

        store.insert_airdrop(Airdrop {
            address: SENDER.to_string(),
            voter_amount: "1".into(),
            multisig_signer_amount: "0".into(),
            gitcoin_amount: "0".into(),
            active_bridged_amount: "0".into(),
            op_user_amount: "0".into(),
            op_repeat_user_amount: "0".into(),
            bonus_amount: "0".into(),
            total_amount: "1".into(),
        });

        let l1_head = HeadTracker::new();
        l1_head.set(8);
        ApiState::new(Arc::new(store), l1_head, HeadTracker::new())
    }

    async fn get(state: ApiState, uri: &str) -> (StatusCode, Value) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = router(seeded_state().await)
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_deposits_are_paginated_in_order() {
        let state = seeded_state().await;
        let uri = format!("/v1/deposits/{}", SENDER.to_string().to_uppercase().replace("0X", "0x"));
        let (status, body) = get(state.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["limit"], 10);
        let numbers: Vec<_> =
            body["items"].as_array().unwrap().iter().map(|d| d["blockNumber"].clone()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(body["items"][0]["amount"], "100000000000000000000");
        assert_eq!(body["items"][0]["l1token"]["symbol"], "ETH");

        let (_, first) = get(state.clone(), &format!("/v1/deposits/{SENDER}?limit=2")).await;
        let (_, second) = get(state, &format!("/v1/deposits/{SENDER}?limit=2&offset=2")).await;
        assert_eq!(first["items"].as_array().unwrap().len(), 2);
        assert_eq!(second["items"].as_array().unwrap().len(), 1);
        assert_eq!(second["items"][0]["blockNumber"], 3);
    }

    #[rstest]
    #[case::deposits_limit("/v1/deposits", "limit=18446744073709551615")]
    #[case::deposits_limit_above_max("/v1/deposits", "limit=101")]
    #[case::deposits_offset("/v1/deposits", "offset=18446744073709551615")]
    #[case::withdrawals_limit("/v1/withdrawals", "limit=18446744073709551615&finalized=true")]
    #[case::withdrawals_offset("/v1/withdrawals", "offset=9223372036854775808")]
    #[tokio::test]
    async fn test_out_of_range_page_is_rejected(#[case] path: &str, #[case] query: &str) {
        let (status, body) = get(seeded_state().await, &format!("{path}/{SENDER}?{query}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid page"));
    }

    #[tokio::test]
    async fn test_largest_page_is_served() {
        let (status, body) =
            get(seeded_state().await, &format!("/v1/deposits/{SENDER}?limit=100")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["limit"], 100);
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_withdrawals_filter_and_batch() {
        let state = seeded_state().await;

        let (_, all) = get(state.clone(), &format!("/v1/withdrawals/{SENDER}")).await;
        assert_eq!(all["pagination"]["total"], 2);
        assert_eq!(all["items"][0]["batch"]["index"], 5);

        let (_, pending) =
            get(state.clone(), &format!("/v1/withdrawals/{SENDER}?finalized=false")).await;
        let pending = pending["items"].as_array().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["finalizedTxHash"], Value::Null);
        assert_eq!(pending[0]["finalizedSuccess"], Value::Null);

        let (_, done) = get(state, &format!("/v1/withdrawals/{SENDER}?finalized=true")).await;
        assert_eq!(done["items"][0]["finalizedSuccess"], true);
    }

    #[tokio::test]
    async fn test_status() {
        let (status, body) = get(seeded_state().await, "/v1/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["l1"]["synced"], 0.5);
        assert_eq!(body["l1"]["highest"]["number"], 4);
        assert_eq!(body["l2"]["synced"], 0.0);
        assert_eq!(body["l2"]["highest"]["number"], 100);

        let (_, l1) = get(seeded_state().await, "/v1/l1/status").await;
        assert_eq!(l1["highest"]["number"], 4);
    }

    #[tokio::test]
    async fn test_airdrop() {
        let state = seeded_state().await;
        let (status, body) = get(state.clone(), &format!("/v1/airdrops/{SENDER}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalAmount"], "1");

        let (status, _) = get(state.clone(), &format!("/v1/airdrops/{}", Address::ZERO)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get(state, "/v1/airdrops/not-an-address").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid address: not-an-address");
    }
}

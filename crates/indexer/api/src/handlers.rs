//! Route handlers.

use crate::{ApiError, ApiResult, ApiState, PageQuery, StatusResponse};
use alloy_primitives::Address;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use boba_indexer_db::{Airdrop, DepositRecord, Paginated, WithdrawalRecord};
use boba_indexer_service::{HeadTracker, SyncStatus};
use std::str::FromStr;

fn parse_address(raw: &str) -> ApiResult<Address> {
    Address::from_str(raw.trim()).map_err(|_| ApiError::InvalidAddress(raw.to_string()))
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn deposits(
    State(state): State<ApiState>,
    Path(address): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Paginated<DepositRecord>>> {
    let address = parse_address(&address)?;
    let page = state.store.get_deposits_by_address(address, query.page()?).await?;
    Ok(Json(page))
}

pub(crate) async fn withdrawals(
    State(state): State<ApiState>,
    Path(address): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Paginated<WithdrawalRecord>>> {
    let address = parse_address(&address)?;
    let mut page = state
        .store
        .get_withdrawals_by_address(address, query.page()?, query.finalization())
        .await?;
    for withdrawal in &mut page.items {
        withdrawal.batch = state.store.get_withdrawal_batch(withdrawal.tx_hash).await?;
    }
    Ok(Json(page))
}

pub(crate) async fn status(State(state): State<ApiState>) -> ApiResult<Json<StatusResponse>> {
    Ok(Json(StatusResponse {
        l1: l1_sync_status(&state).await?,
        l2: l2_sync_status(&state).await?,
    }))
}

pub(crate) async fn l1_status(State(state): State<ApiState>) -> ApiResult<Json<SyncStatus>> {
    Ok(Json(l1_sync_status(&state).await?))
}

pub(crate) async fn l2_status(State(state): State<ApiState>) -> ApiResult<Json<SyncStatus>> {
    Ok(Json(l2_sync_status(&state).await?))
}

async fn l1_sync_status(state: &ApiState) -> ApiResult<SyncStatus> {
    let highest = state.store.get_highest_l1_block().await?;
    Ok(sync_status(highest, &state.l1_head))
}

async fn l2_sync_status(state: &ApiState) -> ApiResult<SyncStatus> {
    let highest = state.store.get_highest_l2_block().await?;
    Ok(sync_status(highest, &state.l2_head))
}

fn sync_status(highest: Option<boba_indexer_db::BlockLocator>, head: &HeadTracker) -> SyncStatus {
    SyncStatus::new(highest, head.get())
}

pub(crate) async fn airdrop(
    State(state): State<ApiState>,
    Path(address): Path<String>,
) -> ApiResult<Json<Airdrop>> {
    let address = parse_address(&address)?;
    state.store.get_airdrop(address).await?.map(Json).ok_or(ApiError::NotFound("airdrop"))
}

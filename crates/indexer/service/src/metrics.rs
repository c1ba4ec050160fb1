//! Metrics of the chain indexers.

use crate::Side;
use alloy_primitives::Address;
use std::time::Duration;

/// Container for the indexer metric names and recorders.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the gauge tracking the highest indexed block.
    pub const SYNC_HEIGHT: &'static str = "boba_indexer_sync_height";
    /// Identifier for the gauge tracking indexed height over chain head.
    pub const SYNC_PERCENT: &'static str = "boba_indexer_sync_percent";
    /// Identifier for the gauge set while an indexer catches up.
    pub const CATCHING_UP: &'static str = "boba_indexer_catching_up";
    /// Identifier for the histogram of update durations.
    pub const UPDATE_DURATION_SECONDS: &'static str = "boba_indexer_update_duration_seconds";
    /// Identifier for the counter of indexed deposits.
    pub const DEPOSITS_TOTAL: &'static str = "boba_indexer_deposits_total";
    /// Identifier for the counter of indexed withdrawals.
    pub const WITHDRAWALS_TOTAL: &'static str = "boba_indexer_withdrawals_total";
    /// Identifier for the counter of indexed state batches.
    pub const STATE_BATCHES_TOTAL: &'static str = "boba_indexer_state_batches_total";
    /// Identifier for the counter of tokens added to the token caches.
    pub const CACHED_TOKENS_TOTAL: &'static str = "boba_indexer_cached_tokens_total";
    /// Identifier for the counter of failed updates.
    pub const UPDATE_ERRORS_TOTAL: &'static str = "boba_indexer_update_errors_total";

    /// Describes the indexer metrics and zeroes the per-side series.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_gauge!(Self::SYNC_HEIGHT, "Highest block persisted by the indexer");
        metrics::describe_gauge!(
            Self::SYNC_PERCENT,
            metrics::Unit::Percent,
            "Persisted height relative to the latest observed chain head"
        );
        metrics::describe_gauge!(
            Self::CATCHING_UP,
            "Set to 1 while the indexer is catching up with the chain head"
        );
        metrics::describe_histogram!(
            Self::UPDATE_DURATION_SECONDS,
            metrics::Unit::Seconds,
            "Duration of a single indexer update"
        );
        metrics::describe_counter!(
            Self::DEPOSITS_TOTAL,
            metrics::Unit::Count,
            "Deposits indexed, by L1 token"
        );
        metrics::describe_counter!(
            Self::WITHDRAWALS_TOTAL,
            metrics::Unit::Count,
            "Withdrawals indexed, by L2 token"
        );
        metrics::describe_counter!(
            Self::STATE_BATCHES_TOTAL,
            metrics::Unit::Count,
            "State batches indexed"
        );
        metrics::describe_counter!(
            Self::CACHED_TOKENS_TOTAL,
            metrics::Unit::Count,
            "Token metadata entries added to the token caches"
        );
        metrics::describe_counter!(
            Self::UPDATE_ERRORS_TOTAL,
            metrics::Unit::Count,
            "Indexer updates that failed"
        );
    }

    fn zero() {
        for side in [Side::L1, Side::L2] {
            let side = side.to_string();
            metrics::gauge!(Self::SYNC_HEIGHT, "side" => side.clone()).set(0.0);
            metrics::gauge!(Self::SYNC_PERCENT, "side" => side.clone()).set(0.0);
            metrics::gauge!(Self::CATCHING_UP, "side" => side.clone()).set(0.0);
            metrics::counter!(Self::CACHED_TOKENS_TOTAL, "side" => side.clone()).increment(0);
            metrics::counter!(Self::UPDATE_ERRORS_TOTAL, "side" => side).increment(0);
        }
        metrics::counter!(Self::STATE_BATCHES_TOTAL).increment(0);
    }

    /// Records the outcome of an update that persisted blocks up to `height` under `head`.
    pub(crate) fn record_sync(side: Side, height: u64, head: u64, elapsed: Duration) {
        let side = side.to_string();
        metrics::gauge!(Self::SYNC_HEIGHT, "side" => side.clone()).set(height as f64);
        if head > 0 {
            metrics::gauge!(Self::SYNC_PERCENT, "side" => side.clone())
                .set(height as f64 / head as f64 * 100.0);
        }
        metrics::histogram!(Self::UPDATE_DURATION_SECONDS, "side" => side)
            .record(elapsed.as_secs_f64());
    }

    pub(crate) fn record_catching_up(side: Side, catching_up: bool) {
        metrics::gauge!(Self::CATCHING_UP, "side" => side.to_string())
            .set(if catching_up { 1.0 } else { 0.0 });
    }

    pub(crate) fn record_update_error(side: Side) {
        metrics::counter!(Self::UPDATE_ERRORS_TOTAL, "side" => side.to_string()).increment(1);
    }

    pub(crate) fn record_deposit(l1_token: Address) {
        metrics::counter!(Self::DEPOSITS_TOTAL, "token" => l1_token.to_string()).increment(1);
    }

    pub(crate) fn record_withdrawal(l2_token: Address) {
        metrics::counter!(Self::WITHDRAWALS_TOTAL, "token" => l2_token.to_string()).increment(1);
    }

    pub(crate) fn record_state_batches(count: usize) {
        metrics::counter!(Self::STATE_BATCHES_TOTAL).increment(count as u64);
    }

    pub(crate) fn record_cached_token(side: Side) {
        metrics::counter!(Self::CACHED_TOKENS_TOTAL, "side" => side.to_string()).increment(1);
    }
}

//! The indexer command.

use crate::{
    flags::{BridgeArgs, DbArgs, IndexerArgs, RestArgs},
    signal::cancel_on_shutdown,
};
use boba_indexer_api::ApiState;
use boba_indexer_cli::{LogArgs, MetricsArgs, cli_styles};
use boba_indexer_db::{BridgeStoreReader, PgStore};
use boba_indexer_service::{
    AlloyChainClient, ChainIndexer, HeadTracker, IndexerDriver, L1Indexer, L2Indexer, Metrics,
    Side, verify_chain_id,
};
use clap::Parser;
use eyre::WrapErr;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Indexes the Boba bridge and serves the indexed transfers.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub(crate) struct Cli {
    /// Logging.
    #[command(flatten)]
    pub(crate) log: LogArgs,
    /// Prometheus exporter.
    #[command(flatten)]
    pub(crate) metrics: MetricsArgs,
    /// Chains and indexing loop.
    #[command(flatten)]
    pub(crate) indexer: IndexerArgs,
    /// Database.
    #[command(flatten)]
    pub(crate) db: DbArgs,
    /// REST API.
    #[command(flatten)]
    pub(crate) rest: RestArgs,
    /// Bridge contracts.
    #[command(flatten)]
    pub(crate) bridges: BridgeArgs,
}

impl Cli {
    /// Runs the indexer and the API until shutdown or a fatal error.
    pub(crate) async fn run(self) -> eyre::Result<()> {
        self.log.init_tracing()?;
        self.metrics.init_metrics()?;
        Metrics::init();

        self.indexer.l1_config().selector()?;
        self.indexer.l2_config().selector()?;
        self.bridges.validate(self.indexer.post_upgrade)?;

        let store = PgStore::connect(self.db.url()?.as_str(), self.db.max_connections)
            .await
            .wrap_err("failed to connect to the database")?;
        store.bootstrap().await.wrap_err("failed to bootstrap the database")?;
        let store = Arc::new(store);

        let cancellation = CancellationToken::new();
        tokio::spawn(cancel_on_shutdown(cancellation.clone()));

        let l1_head = HeadTracker::new();
        let l2_head = HeadTracker::new();
        let mut tasks = JoinSet::new();

        if self.indexer.disable_indexer {
            info!(target: "indexer", "Indexing disabled, serving the API only");
        } else {
            self.spawn_indexers(&mut tasks, &store, &l1_head, &l2_head, &cancellation).await?;
        }

        let api = ApiState::new(store as Arc<dyn BridgeStoreReader>, l1_head, l2_head);
        let addr = self.rest.socket_addr();
        let api_cancellation = cancellation.clone();
        tasks.spawn(async move {
            boba_indexer_api::serve(addr, api, api_cancellation)
                .await
                .wrap_err("API server failed")
        });

        let mut result = Ok(());
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(eyre::Report::from).and_then(|task| task);
            if let Err(err) = outcome {
                error!(target: "indexer", err = ?err, "Task failed, shutting down");
                cancellation.cancel();
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    async fn spawn_indexers(
        &self,
        tasks: &mut JoinSet<eyre::Result<()>>,
        store: &Arc<PgStore>,
        l1_head: &HeadTracker,
        l2_head: &HeadTracker,
        cancellation: &CancellationToken,
    ) -> eyre::Result<()> {
        let timeout = self.indexer.rpc_timeout();
        let l1_client =
            Arc::new(AlloyChainClient::new_http(self.indexer.l1_rpc_url.clone(), timeout));
        let l2_client =
            Arc::new(AlloyChainClient::new_http(self.indexer.l2_rpc_url.clone(), timeout));

        verify_chain_id(Side::L1, &*l1_client, self.indexer.l1_chain_id).await?;
        verify_chain_id(Side::L2, &*l2_client, self.indexer.l2_chain_id).await?;

        let addresses = self.bridges.addresses();
        let post_upgrade = self.indexer.post_upgrade;
        let l1 = L1Indexer::new(
            self.indexer.l1_config(),
            post_upgrade,
            &addresses,
            l1_client,
            Arc::clone(store),
        )?;
        let l2 = L2Indexer::new(
            self.indexer.l2_config(),
            post_upgrade,
            &addresses,
            l2_client,
            Arc::clone(store),
        )?;

        spawn_driver(tasks, l1, l1_head.clone(), cancellation.clone());
        spawn_driver(tasks, l2, l2_head.clone(), cancellation.clone());
        Ok(())
    }
}

fn spawn_driver<I: ChainIndexer + Sync + 'static>(
    tasks: &mut JoinSet<eyre::Result<()>>,
    indexer: I,
    head: HeadTracker,
    cancellation: CancellationToken,
) {
    let side = indexer.side();
    tasks.spawn(async move {
        let mut driver = IndexerDriver::new(indexer, head, cancellation);
        driver.run().await.wrap_err_with(|| format!("{side} indexer stopped"))
    });
}
